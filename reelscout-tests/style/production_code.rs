//! Production Code Checks
//!
//! Library and binary sources must not silence dead code warnings or panic on
//! `unwrap()`. Everything from a file's first `#[cfg(test)]` onwards is test
//! code and exempt, as are the integration tests themselves.

use std::fs;
use std::path::{Path, PathBuf};

/// A violation found in production code
#[derive(Debug)]
struct Violation {
    file_path: String,
    line_number: usize,
    rule: &'static str,
    context: String,
}

/// Scans the `src` trees of the workspace crates
struct ProductionCodeChecker {
    violations: Vec<Violation>,
    files_checked: usize,
}

impl ProductionCodeChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    fn workspace_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
    }

    /// Source files of every `reelscout-*` crate except this one.
    fn find_source_files(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(Self::workspace_root())? {
            let path = entry?.path();
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if !name.starts_with("reelscout-") || name == "reelscout-tests" {
                continue;
            }
            let src = path.join("src");
            if src.is_dir() {
                Self::find_rust_files_recursive(&src, &mut files, 0)?;
            }
        }
        Ok(files)
    }

    fn find_rust_files_recursive(
        dir: &Path,
        files: &mut Vec<PathBuf>,
        depth: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if depth > 8 {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::find_rust_files_recursive(&path, files, depth + 1)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    fn check_content(&mut self, file_path: &str, content: &str) {
        self.files_checked += 1;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }

            let rule = if trimmed.contains("#[allow(") && trimmed.contains("dead_code") {
                Some("dead code allowance")
            } else if trimmed.contains(".unwrap()") {
                Some("unwrap in production code")
            } else {
                None
            };

            if let Some(rule) = rule {
                self.violations.push(Violation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    rule,
                    context: trimmed.to_string(),
                });
            }
        }
    }

    fn check_workspace(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        for file in self.find_source_files()? {
            let content = fs::read_to_string(&file)?;
            self.check_content(&file.to_string_lossy(), &content);
        }
        Ok(())
    }

    fn report_violations(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Production code checks: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        for violation in &self.violations {
            println!(
                "{}:{} [{}]\n  {}",
                violation.file_path, violation.line_number, violation.rule, violation.context
            );
        }
        println!(
            "Found {} violation(s) in {} file(s) checked",
            self.violations.len(),
            self.files_checked
        );
        false
    }
}

#[test]
fn test_detects_violations_before_test_module() {
    let mut checker = ProductionCodeChecker::new();
    let content = r#"
#[allow(dead_code)]
fn unused() {}

fn risky(value: Option<u8>) -> u8 {
    // .unwrap() in a comment is fine
    value.unwrap()
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_ok() {
        Some(1).unwrap();
    }
}
"#;

    checker.check_content("sample.rs", content);

    let lines: Vec<usize> = checker.violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, vec![2, 7]);
}

#[test]
fn test_workspace_production_code() {
    let mut checker = ProductionCodeChecker::new();

    checker
        .check_workspace()
        .expect("Failed to read workspace sources");

    assert!(checker.files_checked > 0);
    assert!(
        checker.report_violations(),
        "Production code violations found - see output above"
    );
}
