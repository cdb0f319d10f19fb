use std::path::{Path, PathBuf};
use std::process;

use clap::Args;

use jackc::diagnostic::render_diagnostics;

use super::resolve_jack_files;

#[derive(Args)]
pub struct BuildArgs {
    /// Input .jack file, or a directory containing .jack files
    pub input: PathBuf,
    /// Output .vm file (single-file input only; default: <input>.vm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd_build(args: BuildArgs) {
    let BuildArgs { input, output } = args;
    let dir_mode = input.is_dir();

    let files = match resolve_jack_files(&input) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", input.display(), e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("error: no .jack files found in '{}'", input.display());
        process::exit(1);
    }

    // In directory mode, `-o` names the output directory (created if
    // missing); in single-file mode it names the output file directly.
    if dir_mode {
        if let Some(out_dir) = &output {
            if let Err(e) = std::fs::create_dir_all(out_dir) {
                eprintln!("error: cannot create '{}': {}", out_dir.display(), e);
                process::exit(1);
            }
        }
    }

    let mut had_errors = false;
    for (file_id, path) in files.iter().enumerate() {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path.display(), e);
                had_errors = true;
                continue;
            }
        };

        match jackc::compiler::compile_class(&source, file_id as u16) {
            Ok(vm) => {
                let out_path = out_path_for(path, &output, dir_mode);
                if let Err(e) = std::fs::write(&out_path, &vm) {
                    eprintln!("error: cannot write '{}': {}", out_path.display(), e);
                    had_errors = true;
                    continue;
                }
                eprintln!("Compiled -> {}", out_path.display());
            }
            Err(diagnostics) => {
                render_diagnostics(&diagnostics, &path.display().to_string(), &source);
                had_errors = true;
            }
        }
    }

    if had_errors {
        process::exit(1);
    }
}

fn out_path_for(input_file: &Path, output: &Option<PathBuf>, dir_mode: bool) -> PathBuf {
    match (output, dir_mode) {
        (Some(out_dir), true) => {
            let stem = input_file.file_stem().unwrap_or_default();
            out_dir.join(stem).with_extension("vm")
        }
        (Some(out_file), false) => out_file.clone(),
        (None, _) => input_file.with_extension("vm"),
    }
}

#[cfg(test)]
mod tests {
    use super::out_path_for;
    use std::path::PathBuf;

    #[test]
    fn single_file_mode_defaults_to_sibling_vm() {
        let path = out_path_for(&PathBuf::from("src/Main.jack"), &None, false);
        assert_eq!(path, PathBuf::from("src/Main.vm"));
    }

    #[test]
    fn single_file_mode_honours_explicit_output() {
        let out = Some(PathBuf::from("build/out.vm"));
        let path = out_path_for(&PathBuf::from("src/Main.jack"), &out, false);
        assert_eq!(path, PathBuf::from("build/out.vm"));
    }

    #[test]
    fn directory_mode_defaults_to_sibling_vm_per_file() {
        let path = out_path_for(&PathBuf::from("proj/Main.jack"), &None, true);
        assert_eq!(path, PathBuf::from("proj/Main.vm"));
    }

    #[test]
    fn directory_mode_output_names_a_directory() {
        let out = Some(PathBuf::from("build"));
        let path = out_path_for(&PathBuf::from("proj/Main.jack"), &out, true);
        assert_eq!(path, PathBuf::from("build/Main.vm"));
    }
}
