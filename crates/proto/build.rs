//! Compiles the roomdesk `.proto` files with `tonic-build`.
//!
//! Requires `protoc` on the `PATH` (or `PROTOC` set).

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = [
        "proto/common.proto",
        "proto/booking.proto",
        "proto/client.proto",
        "proto/room.proto",
    ];

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&proto_files, &["proto/"])?;

    for proto in &proto_files {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
