use log::debug;
use prost::Message;

use super::headers::{MetaHeader, ServiceMessage, VerificationHeader};
use crate::crypto::{verify_signature, SignatureScheme, Signer};
use crate::proto::refs::Signature;
use crate::Result;

/// A message whose verification header has been filled in for this hop.
///
/// Only [`sign_message`] creates one, so holding a `Signed<M>` means the
/// message is ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Signed<M>(M);

impl<M> Signed<M> {
    pub fn get_ref(&self) -> &M {
        &self.0
    }

    pub fn into_inner(self) -> M {
        self.0
    }
}

/// Adds this hop's verification header to `message`.
///
/// The body is signed only when the message has no verification header yet;
/// a forwarding hop leaves the first hop's body signature inside the origin
/// chain. The meta header is signed at every hop. The origin signature covers
/// the previous verification header, or an empty header on the first hop.
pub fn sign_message<M: ServiceMessage>(mut message: M, signer: &Signer) -> Result<Signed<M>> {
    if message.meta_header().is_none() {
        *message.meta_header_mut() = Some(M::Meta::default());
    }
    let origin = message.verify_header_mut().take();

    let body_signature = match origin {
        None => Some(signer.sign(&encode_body(&message))?),
        Some(_) => None,
    };

    let meta = message.meta_header().map(Message::encode_to_vec).unwrap_or_default();
    let meta_signature = signer.sign(&meta)?;

    let origin_signature = match &origin {
        None => signer.sign(&M::Verify::default().encode_to_vec())?,
        Some(origin) => signer.sign(&origin.encode_to_vec())?,
    };

    let header = M::Verify::chain(body_signature, meta_signature, origin_signature, origin);
    debug!("Added verification header, chain depth is now {}", chain_depth(&header));
    *message.verify_header_mut() = Some(header);

    Ok(Signed(message))
}

/// Prepares a received message for the next hop by wrapping its meta header.
pub fn forward<M: ServiceMessage>(mut message: M, ttl: u32) -> M {
    let meta = message.meta_header_mut().take().unwrap_or_default();
    *message.meta_header_mut() = Some(meta.wrap(ttl));
    message
}

/// Checks every header of the verification chain of `message`.
///
/// At each level the meta signature is checked against the meta header of the
/// same depth. When the meta chain is shorter than the verification chain the
/// deepest meta header is reused, which is what a hop that re-signs without
/// wrapping the meta header produces.
pub fn verify_message<M: ServiceMessage>(message: &M, scheme: &SignatureScheme) -> Result<bool> {
    let mut verify = match message.verify_header() {
        Some(verify) => verify,
        None => return Ok(false),
    };
    let empty_meta = M::Meta::default();
    let mut meta = message.meta_header().unwrap_or(&empty_meta);

    loop {
        if !check(scheme, verify.meta_signature(), &meta.encode_to_vec())? {
            return Ok(false);
        }
        match verify.origin() {
            Some(origin) => {
                if !check(scheme, verify.origin_signature(), &origin.encode_to_vec())? {
                    return Ok(false);
                }
                verify = origin;
                if let Some(origin_meta) = meta.origin() {
                    meta = origin_meta;
                }
            }
            None => {
                let empty = M::Verify::default().encode_to_vec();
                if !check(scheme, verify.origin_signature(), &empty)? {
                    return Ok(false);
                }
                return check(scheme, verify.body_signature(), &encode_body(message));
            }
        }
    }
}

/// Number of verification headers in the chain starting at `header`.
pub fn chain_depth<V: VerificationHeader>(header: &V) -> usize {
    let mut depth = 1;
    let mut current = header;
    while let Some(origin) = current.origin() {
        depth += 1;
        current = origin;
    }
    depth
}

fn encode_body<M: ServiceMessage>(message: &M) -> Vec<u8> {
    message.body().map(Message::encode_to_vec).unwrap_or_default()
}

fn check(scheme: &SignatureScheme, signature: Option<&Signature>, data: &[u8]) -> Result<bool> {
    match signature {
        Some(signature) => verify_signature(scheme, signature, data),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Curve, PrivateKey};
    use crate::proto::accounting::{balance_request, BalanceRequest};
    use crate::proto::refs::OwnerId;
    use crate::proto::session::{RequestMetaHeader, RequestVerificationHeader};

    const ROOT_KEY: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";
    const HOP_KEY: &str = "c28a9f80738f770d527803a566cf6fc3edf6cea586c4fc4a5223a5ad797e1ac3";

    fn signer(key: &str) -> Signer {
        Signer::new(
            PrivateKey::from_hex(Curve::P256, key).unwrap(),
            SignatureScheme::default(),
        )
        .unwrap()
    }

    fn request(ttl: u32) -> BalanceRequest {
        BalanceRequest {
            body: Some(balance_request::Body {
                owner_id: Some(OwnerId { value: vec![0x35; 25] }),
            }),
            meta_header: Some(RequestMetaHeader {
                ttl,
                ..Default::default()
            }),
            verify_header: None,
        }
    }

    fn verify_header(request: &BalanceRequest) -> &RequestVerificationHeader {
        request.verify_header.as_ref().unwrap()
    }

    #[test]
    fn root_hop_signs_body_meta_and_empty_origin() {
        let signer = signer(ROOT_KEY);
        let request = sign_message(request(2), &signer).unwrap().into_inner();
        let header = verify_header(&request);
        let scheme = signer.scheme();

        let body = header.body_signature.as_ref().unwrap();
        let body_bytes = request.body.as_ref().unwrap().encode_to_vec();
        assert!(verify_signature(scheme, body, &body_bytes).unwrap());

        let meta = header.meta_signature.as_ref().unwrap();
        let meta_bytes = request.meta_header.as_ref().unwrap().encode_to_vec();
        assert!(verify_signature(scheme, meta, &meta_bytes).unwrap());

        let origin = header.origin_signature.as_ref().unwrap();
        assert!(verify_signature(scheme, origin, &[]).unwrap());
        assert!(header.origin.is_none());
        assert_eq!(chain_depth(header), 1);
    }

    #[test]
    fn missing_meta_header_is_created() {
        let mut unsigned = request(0);
        unsigned.meta_header = None;
        let request = sign_message(unsigned, &signer(ROOT_KEY)).unwrap().into_inner();
        assert_eq!(request.meta_header, Some(RequestMetaHeader::default()));
        assert!(verify_message(&request, &SignatureScheme::default()).unwrap());
    }

    #[test]
    fn forwarding_hop_keeps_root_body_signature() {
        let root = sign_message(request(2), &signer(ROOT_KEY)).unwrap().into_inner();
        let root_header = verify_header(&root).clone();

        let hop = signer(HOP_KEY);
        let forwarded = sign_message(forward(root, 1), &hop).unwrap().into_inner();
        let header = verify_header(&forwarded);

        assert!(header.body_signature.is_none());
        assert_eq!(header.origin.as_deref(), Some(&root_header));
        assert_eq!(
            header.origin.as_ref().unwrap().body_signature,
            root_header.body_signature
        );
        assert_eq!(header.meta_signature.as_ref().unwrap().key, hop.public_key());

        let origin_bytes = root_header.encode_to_vec();
        let origin_signature = header.origin_signature.as_ref().unwrap();
        assert!(verify_signature(hop.scheme(), origin_signature, &origin_bytes).unwrap());
        assert_eq!(chain_depth(header), 2);

        let meta = forwarded.meta_header.as_ref().unwrap();
        assert_eq!(meta.ttl, 1);
        assert_eq!(meta.origin.as_ref().unwrap().ttl, 2);
    }

    #[test]
    fn verifies_root_and_forwarded_chains() {
        let scheme = SignatureScheme::default();
        let root = sign_message(request(2), &signer(ROOT_KEY)).unwrap().into_inner();
        assert!(verify_message(&root, &scheme).unwrap());

        let forwarded = sign_message(forward(root.clone(), 1), &signer(HOP_KEY))
            .unwrap()
            .into_inner();
        assert!(verify_message(&forwarded, &scheme).unwrap());

        let resigned = sign_message(root, &signer(HOP_KEY)).unwrap().into_inner();
        assert!(verify_message(&resigned, &scheme).unwrap());
    }

    #[test]
    fn tampering_breaks_verification() {
        let scheme = SignatureScheme::default();
        let signed = sign_message(request(2), &signer(ROOT_KEY)).unwrap().into_inner();

        let mut body_changed = signed.clone();
        body_changed.body.as_mut().unwrap().owner_id = Some(OwnerId { value: vec![1; 25] });
        assert!(!verify_message(&body_changed, &scheme).unwrap());

        let mut meta_changed = signed.clone();
        meta_changed.meta_header.as_mut().unwrap().ttl = 7;
        assert!(!verify_message(&meta_changed, &scheme).unwrap());

        let forwarded = sign_message(forward(signed, 1), &signer(HOP_KEY))
            .unwrap()
            .into_inner();
        let mut origin_changed = forwarded.clone();
        let origin = origin_changed.verify_header.as_mut().unwrap().origin.as_mut().unwrap();
        origin.meta_signature = origin.body_signature.clone();
        assert!(!verify_message(&origin_changed, &scheme).unwrap());

        let mut unsigned = forwarded;
        unsigned.verify_header = None;
        assert!(!verify_message(&unsigned, &scheme).unwrap());
    }

    #[test]
    fn node_meta_fields_survive_the_wire() {
        use crate::proto::accounting::{balance_response, BalanceResponse, Decimal};
        use crate::proto::session::{ResponseMetaHeader, XHeader};
        use crate::proto::status::Status;

        let response = BalanceResponse {
            body: Some(balance_response::Body {
                balance: Some(Decimal { value: 1, precision: 12 }),
            }),
            meta_header: Some(ResponseMetaHeader {
                epoch: 9,
                ttl: 1,
                x_headers: vec![XHeader {
                    key: String::from("__NEOFS__NETMAP_EPOCH"),
                    value: String::from("9"),
                }],
                status: Some(Status {
                    code: 0,
                    message: String::from("OK"),
                    details: Vec::new(),
                }),
                ..Default::default()
            }),
            verify_header: None,
        };
        let signed = sign_message(response, &signer(HOP_KEY)).unwrap().into_inner();

        let wire = signed.encode_to_vec();
        let decoded = BalanceResponse::decode(wire.as_slice()).unwrap();
        assert!(verify_message(&decoded, &SignatureScheme::default()).unwrap());

        let mut stripped = decoded;
        stripped.meta_header.as_mut().unwrap().x_headers.clear();
        assert!(!verify_message(&stripped, &SignatureScheme::default()).unwrap());
    }
}
