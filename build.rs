//! Build script - points the linker at the esp-hal linker scripts when
//! building for the board.

use std::env;

fn main() {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if arch == "xtensa" {
        println!("cargo:rustc-link-arg=-Tlinkall.x");
        println!("cargo:rustc-link-arg=-nostartfiles");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
