fn main() {
    // Bindings come from proc-macros in src/ffi.rs; nothing to generate here.
    println!("cargo:rerun-if-changed=src/ffi.rs");
}
