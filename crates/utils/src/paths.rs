//! Path helpers for locating per-model evaluation results

use evalrig_core::{Error, Result, MODEL_NAME_SLASH_ENCODING};
use std::fs;
use std::path::{Path, PathBuf};

/// Encode a model name for use as a single path component.
///
/// Hub ids like `bigscience/bloomz-7b1` carry a '/', which result
/// directories cannot, so the slash is replaced with the encoding marker.
pub fn model_name_to_path_component(model_name: &str) -> String {
    model_name.replace('/', MODEL_NAME_SLASH_ENCODING)
}

/// Exact inverse of [`model_name_to_path_component`]
pub fn path_component_to_model_name(component: &str) -> String {
    component.replace(MODEL_NAME_SLASH_ENCODING, "/")
}

/// Results directory for one model under a base directory
pub fn model_results_dir(base: &Path, model_name: &str) -> PathBuf {
    base.join(model_name_to_path_component(model_name))
}

/// Results directory for one model, created if missing
pub fn ensure_model_results_dir(base: &Path, model_name: &str) -> Result<PathBuf> {
    let dir = model_results_dir(base, model_name);
    fs::create_dir_all(&dir)
        .map_err(|e| Error::file_system(dir.clone(), "create results directory", e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_slashes_for_path_use() {
        assert_eq!(
            model_name_to_path_component("bigscience/bloomz-7b1"),
            "bigscience--bloomz-7b1"
        );
        assert_eq!(model_name_to_path_component("gpt2"), "gpt2");
    }

    #[test]
    fn decoding_is_the_exact_inverse() {
        assert_eq!(
            path_component_to_model_name("bigscience--bloomz-7b1"),
            "bigscience/bloomz-7b1"
        );
        assert_eq!(path_component_to_model_name("gpt2"), "gpt2");
    }

    #[test]
    fn results_dir_uses_the_encoded_name() {
        let dir = model_results_dir(Path::new("results"), "meta-llama/Llama-2-7b-hf");
        assert_eq!(dir, Path::new("results/meta-llama--Llama-2-7b-hf"));
    }

    #[test]
    fn ensure_creates_the_directory() {
        let base = tempfile::tempdir().unwrap();
        let dir = ensure_model_results_dir(base.path(), "org/model").unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("org--model"));
    }
}
