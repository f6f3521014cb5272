use std::env;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;

fn main() -> Result<()> {
    let out_dir = env::var_os("OUT_DIR").context("OUT_DIR is not set")?;

    println!("cargo::rerun-if-changed=corpus/");

    let mut corpora = vec![];

    for entry in fs::read_dir("corpus").context("Reading corpus/")? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().unwrap_or_default().to_string_lossy() == "txt" {
            let name = path
                .file_stem()
                .context("Corpus file without a name")?
                .to_string_lossy()
                .into_owned();

            let path = std::path::absolute(&path)
                .context(format!("Resolving {}", path.display()))?;

            corpora.push((name, path));
        }
    }

    corpora.sort();

    {
        let gen_path = Path::new(&out_dir).join("generated_files.rs");
        let mut file = File::create(gen_path)?;

        writeln!(file, "fn get_corpus_files() -> Vec<(&'static str, &'static str)> {{")?;
        writeln!(file, "  vec![")?;
        for (name, path) in &corpora {
            writeln!(file, "    (\"{name}\", include_str!(r\"{}\")),", path.display())?;
        }
        writeln!(file, "  ]")?;
        writeln!(file, "}}")?;
    }

    Ok(())
}
