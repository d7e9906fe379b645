//! Build script for cuprof-cuda.
//!
//! When the `cuda` feature is enabled this script:
//! 1. Locates the CUDA toolkit
//! 2. Adds its library directory to the native search path
//! 3. Links libnvToolsExt and libcudart
//!
//! Without the feature nothing is linked and the crate builds a stub backend.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-env-changed=CUDA_PATH");
    println!("cargo:rerun-if-env-changed=CUDA_HOME");
    println!("cargo:rerun-if-env-changed=NVTOOLSEXT_PATH");

    if env::var("CARGO_FEATURE_CUDA").is_err() {
        return;
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    match find_cuda_root() {
        Some(root) => {
            for dir in library_dirs(&root, &target_os) {
                if dir.exists() {
                    println!("cargo:rustc-link-search=native={}", dir.display());
                }
            }
        }
        None => {
            println!(
                "cargo:warning=CUDA toolkit not found - relying on the default linker search path"
            );
        }
    }

    // NVTX v2 ships as its own library on Windows, outside the toolkit tree.
    if let Ok(nvtx_path) = env::var("NVTOOLSEXT_PATH") {
        let nvtx_root = PathBuf::from(nvtx_path);
        for dir in [nvtx_root.join("lib").join("x64"), nvtx_root.join("lib")] {
            if dir.exists() {
                println!("cargo:rustc-link-search=native={}", dir.display());
            }
        }
    }

    let nvtx_lib = if target_os == "windows" {
        "nvToolsExt64_1"
    } else {
        "nvToolsExt"
    };
    println!("cargo:rustc-link-lib=dylib={}", nvtx_lib);
    println!("cargo:rustc-link-lib=dylib=cudart");
}

/// Find the CUDA toolkit root.
fn find_cuda_root() -> Option<PathBuf> {
    for var in ["CUDA_PATH", "CUDA_HOME"] {
        if let Ok(path) = env::var(var) {
            let root = PathBuf::from(path);
            if root.exists() {
                return Some(root);
            }
        }
    }

    for path in ["/usr/local/cuda", "/opt/cuda"] {
        let root = PathBuf::from(path);
        if root.exists() {
            return Some(root);
        }
    }

    None
}

/// Library directories under a toolkit root, most specific first.
fn library_dirs(root: &Path, target_os: &str) -> Vec<PathBuf> {
    if target_os == "windows" {
        vec![root.join("lib").join("x64")]
    } else {
        vec![
            root.join("lib64"),
            root.join("lib"),
            root.join("targets").join("x86_64-linux").join("lib"),
            root.join("targets").join("sbsa-linux").join("lib"),
        ]
    }
}
