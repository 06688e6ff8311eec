use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::var("PROTOC").is_err() {
        if let Ok(path) = protoc_bin_vendored::protoc_bin_path() {
            env::set_var("PROTOC", path);
        }
    }

    tonic_build::configure().compile(
        &[
            "proto/refs/types.proto",
            "proto/status/types.proto",
            "proto/session/types.proto",
            "proto/accounting/types.proto",
            "proto/accounting/service.proto",
        ],
        &["proto"],
    )?;

    println!("cargo:rerun-if-changed=proto");
    Ok(())
}
