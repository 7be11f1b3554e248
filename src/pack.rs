//! Component 2 — assemble sources into archive files.
//!
//! Each `.rs2asm` source becomes one payload file named by its decimal
//! script id under `<out>/<namespace>/`, plus an optional `.hash` sidecar
//! copied from beside the source. The namespace directory is cleared up
//! front so reruns never see stale archives.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::asm::{ScriptAssembler, ScriptEncoder};
use crate::error::BuildError;
use crate::model::{LOCAL_SCRIPT_BASE, SymbolTable};
use crate::report::Reporter;

/// Assemble every `.rs2asm` file in `inputs` into `out_dir/<namespace>/`.
///
/// Fails fast on the first error; returns the number of scripts written.
pub fn assemble(
    inputs: &[PathBuf],
    symbols: &SymbolTable,
    out_dir: &Path,
    namespace: u16,
    asm: &dyn ScriptAssembler,
    codec: &dyn ScriptEncoder,
    reporter: &dyn Reporter,
) -> Result<usize, BuildError> {
    let script_out = out_dir.join(namespace.to_string());
    fs::create_dir_all(&script_out).map_err(|e| BuildError::Cleanup {
        path: script_out.clone(),
        source: e,
    })?;
    clear_dir(&script_out)?;

    // BTreeSet collapses duplicate inputs and fixes the iteration order.
    let sources: BTreeSet<&PathBuf> = inputs
        .iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "rs2asm"))
        .collect();

    let mut count = 0;
    for source in sources {
        reporter.info(&format!("Assembling {}", source.display()));

        let bytes = fs::read(source).map_err(|e| BuildError::SourceIo {
            path: source.clone(),
            source: e,
        })?;
        let script = asm
            .assemble(&bytes, symbols)
            .map_err(|e| BuildError::Assemble {
                path: source.clone(),
                source: e,
            })?;
        let payload = codec.encode(&script);

        let target = script_out.join(script.id.to_string());
        fs::write(&target, &payload).map_err(|e| BuildError::SourceIo {
            path: target.clone(),
            source: e,
        })?;

        copy_hash_sidecar(source, &script_out, script.id)?;
        count += 1;
    }

    reporter.lifecycle(&format!("Assembled {count} scripts"));
    Ok(count)
}

/// Remove everything inside `dir`, leaving `dir` itself in place.
fn clear_dir(dir: &Path) -> Result<(), BuildError> {
    let wrap = |e: std::io::Error| BuildError::Cleanup {
        path: dir.to_path_buf(),
        source: e,
    };

    for entry in fs::read_dir(dir).map_err(wrap)? {
        let entry = entry.map_err(wrap)?;
        let path = entry.path();
        if entry.file_type().map_err(wrap)?.is_dir() {
            fs::remove_dir_all(&path).map_err(wrap)?;
        } else {
            fs::remove_file(&path).map_err(wrap)?;
        }
    }
    Ok(())
}

/// Copy `<source>.hash` to `<script_out>/<id>.hash` when it exists.
///
/// Baseline scripts (id below `LOCAL_SCRIPT_BASE`) must have one; locally
/// injected scripts above the threshold skip silently.
fn copy_hash_sidecar(source: &Path, script_out: &Path, id: u32) -> Result<(), BuildError> {
    let hash_file = source.with_extension("hash");
    if hash_file.exists() {
        let target = script_out.join(format!("{id}.hash"));
        fs::copy(&hash_file, &target).map_err(|e| BuildError::SourceIo {
            path: hash_file,
            source: e,
        })?;
    } else if id < LOCAL_SCRIPT_BASE {
        return Err(BuildError::MissingHashFile(source.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::{PlainAssembler, PlainCodec};
    use crate::report::NullReporter;
    use tempfile::TempDir;

    const NS: u16 = 2;

    fn write_script(dir: &Path, name: &str, id: u32, with_hash: bool) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!(".id {id}\nreturn\n")).unwrap();
        if with_hash {
            fs::write(path.with_extension("hash"), b"cafebabe").unwrap();
        }
        path
    }

    fn run(inputs: &[PathBuf], out: &Path) -> Result<usize, BuildError> {
        assemble(
            inputs,
            &SymbolTable::new(),
            out,
            NS,
            &PlainAssembler,
            &PlainCodec,
            &NullReporter,
        )
    }

    #[test]
    fn test_writes_payload_and_sidecar() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let script = write_script(src.path(), "hello.rs2asm", 123, true);

        let count = run(&[script], out.path()).expect("assembles");
        assert_eq!(count, 1);

        let payload = fs::read(out.path().join("2/123")).expect("payload written");
        assert_eq!(&payload[..4], &123u32.to_be_bytes());
        let hash = fs::read(out.path().join("2/123.hash")).expect("sidecar copied");
        assert_eq!(hash, b"cafebabe");
    }

    #[test]
    fn test_hash_required_below_threshold() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let baseline = write_script(src.path(), "baseline.rs2asm", 9_999, false);
        let err = run(&[baseline], out.path()).unwrap_err();
        assert!(matches!(err, BuildError::MissingHashFile(_)));

        let local = write_script(src.path(), "local.rs2asm", 10_000, false);
        let count = run(&[local], out.path()).expect("exempt from hash");
        assert_eq!(count, 1);
        assert!(out.path().join("2/10000").exists());
        assert!(!out.path().join("2/10000.hash").exists());
    }

    #[test]
    fn test_clears_stale_archives() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let script_out = out.path().join(NS.to_string());
        fs::create_dir_all(&script_out).unwrap();
        fs::write(script_out.join("777"), b"stale").unwrap();

        let script = write_script(src.path(), "only.rs2asm", 10_001, false);
        run(&[script], out.path()).expect("assembles");

        assert!(!script_out.join("777").exists(), "stale archive survived");
        assert!(script_out.join("10001").exists());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let script = write_script(src.path(), "stable.rs2asm", 321, true);

        run(std::slice::from_ref(&script), out.path()).expect("first run");
        let first = fs::read(out.path().join("2/321")).unwrap();
        run(std::slice::from_ref(&script), out.path()).expect("second run");
        let second = fs::read(out.path().join("2/321")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_skips_non_source_files_and_dedups() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let script = write_script(src.path(), "one.rs2asm", 10_500, false);
        let stray = src.path().join("notes.txt");
        fs::write(&stray, b"not a script").unwrap();

        // Same script listed twice plus an unrelated file.
        let count = run(&[script.clone(), script, stray], out.path()).expect("assembles");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_assembler_failure_names_source() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = src.path().join("broken.rs2asm");
        fs::write(&path, "no id directive\n").unwrap();

        let err = run(&[path.clone()], out.path()).unwrap_err();
        match err {
            BuildError::Assemble { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Assemble error, got {other:?}"),
        }
    }
}
