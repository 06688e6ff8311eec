use prost::Message;

use crate::proto::accounting::{balance_request, balance_response, BalanceRequest, BalanceResponse};
use crate::proto::refs::Signature;
use crate::proto::session::{
    RequestMetaHeader, RequestVerificationHeader, ResponseMetaHeader, ResponseVerificationHeader,
};

pub trait MetaHeader: Message + Default + Clone {
    fn ttl(&self) -> u32;

    fn origin(&self) -> Option<&Self>;

    /// New header for the next hop, keeping `self` as its origin.
    fn wrap(self, ttl: u32) -> Self;
}

pub trait VerificationHeader: Message + Default + Clone {
    fn body_signature(&self) -> Option<&Signature>;

    fn meta_signature(&self) -> Option<&Signature>;

    fn origin_signature(&self) -> Option<&Signature>;

    fn origin(&self) -> Option<&Self>;

    fn chain(
        body_signature: Option<Signature>,
        meta_signature: Signature,
        origin_signature: Signature,
        origin: Option<Self>,
    ) -> Self;
}

/// A message made of a body, a meta header and a verification header chain.
pub trait ServiceMessage {
    type Body: Message;
    type Meta: MetaHeader;
    type Verify: VerificationHeader;

    fn body(&self) -> Option<&Self::Body>;

    fn meta_header(&self) -> Option<&Self::Meta>;

    fn meta_header_mut(&mut self) -> &mut Option<Self::Meta>;

    fn verify_header(&self) -> Option<&Self::Verify>;

    fn verify_header_mut(&mut self) -> &mut Option<Self::Verify>;
}

macro_rules! impl_meta_header {
    ($($meta:ty),+) => {$(
        impl MetaHeader for $meta {
            fn ttl(&self) -> u32 {
                self.ttl
            }

            fn origin(&self) -> Option<&Self> {
                self.origin.as_deref()
            }

            fn wrap(self, ttl: u32) -> Self {
                let version = self.version.clone();
                let epoch = self.epoch;
                Self {
                    version,
                    epoch,
                    ttl,
                    origin: Some(Box::new(self)),
                    ..Default::default()
                }
            }
        }
    )+};
}

macro_rules! impl_verification_header {
    ($($verify:ty),+) => {$(
        impl VerificationHeader for $verify {
            fn body_signature(&self) -> Option<&Signature> {
                self.body_signature.as_ref()
            }

            fn meta_signature(&self) -> Option<&Signature> {
                self.meta_signature.as_ref()
            }

            fn origin_signature(&self) -> Option<&Signature> {
                self.origin_signature.as_ref()
            }

            fn origin(&self) -> Option<&Self> {
                self.origin.as_deref()
            }

            fn chain(
                body_signature: Option<Signature>,
                meta_signature: Signature,
                origin_signature: Signature,
                origin: Option<Self>,
            ) -> Self {
                Self {
                    body_signature,
                    meta_signature: Some(meta_signature),
                    origin_signature: Some(origin_signature),
                    origin: origin.map(Box::new),
                }
            }
        }
    )+};
}

macro_rules! impl_service_message {
    ($($message:ty => ($body:ty, $meta:ty, $verify:ty)),+ $(,)?) => {$(
        impl ServiceMessage for $message {
            type Body = $body;
            type Meta = $meta;
            type Verify = $verify;

            fn body(&self) -> Option<&Self::Body> {
                self.body.as_ref()
            }

            fn meta_header(&self) -> Option<&Self::Meta> {
                self.meta_header.as_ref()
            }

            fn meta_header_mut(&mut self) -> &mut Option<Self::Meta> {
                &mut self.meta_header
            }

            fn verify_header(&self) -> Option<&Self::Verify> {
                self.verify_header.as_ref()
            }

            fn verify_header_mut(&mut self) -> &mut Option<Self::Verify> {
                &mut self.verify_header
            }
        }
    )+};
}

impl_meta_header!(RequestMetaHeader, ResponseMetaHeader);
impl_verification_header!(RequestVerificationHeader, ResponseVerificationHeader);
impl_service_message! {
    BalanceRequest => (balance_request::Body, RequestMetaHeader, RequestVerificationHeader),
    BalanceResponse => (balance_response::Body, ResponseMetaHeader, ResponseVerificationHeader),
}
