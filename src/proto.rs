//! Generated NeoFS API v2 messages and the accounting gRPC service.

pub mod neo {
    pub mod fs {
        pub mod v2 {
            pub mod refs {
                tonic::include_proto!("neo.fs.v2.refs");
            }
            pub mod status {
                tonic::include_proto!("neo.fs.v2.status");
            }
            pub mod session {
                tonic::include_proto!("neo.fs.v2.session");
            }
            pub mod accounting {
                tonic::include_proto!("neo.fs.v2.accounting");
            }
        }
    }
}

pub use self::neo::fs::v2::{accounting, refs, session, status};
