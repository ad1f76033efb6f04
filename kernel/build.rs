/// emcpu monitor build script.
///
/// Hands the linker script to the linker when building for the bare-metal
/// riscv32 target. Host builds (unit tests) link normally.
fn main() {
    println!("cargo:rerun-if-changed=link.ld");

    let target = std::env::var("TARGET").unwrap_or_default();
    if !target.starts_with("riscv32") {
        return;
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    println!("cargo:rustc-link-arg-bins=-T{}/link.ld", manifest_dir);
}
