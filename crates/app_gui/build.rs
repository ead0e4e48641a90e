use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=PHOTO_HISTORY_VERSION");
    let version = env::var("PHOTO_HISTORY_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=PHOTO_HISTORY_VERSION={version}");
}
