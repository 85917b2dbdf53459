// build.rs

extern crate nasm_rs;

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src/bootcode/boot.asm");
    println!("cargo:rerun-if-changed=linker.ld");

    // The boot stub is 32 bit code for the kernel target only, host builds (tests) go without it.
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_arch == "x86" {
        nasm_rs::compile_library_args("libboot.a", &["src/bootcode/boot.asm"], &["-f", "elf32"]);
        println!("cargo:rustc-link-lib=static=boot");
    }
}
