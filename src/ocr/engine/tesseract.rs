use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Command;
use tracing::warn;

pub fn list_tesseract_languages() -> Result<Vec<String>> {
    let output = Command::new("tesseract")
        .arg("--list-langs")
        .output()
        .with_context(|| "failed to run tesseract --list-langs")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("tesseract --list-langs failed: {}", stderr.trim()));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_language_list(&stdout))
}

fn parse_language_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

pub(super) fn normalize_ocr_languages(requested: &str) -> Result<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("ocr languages is empty"));
    }

    let available = match list_tesseract_languages() {
        Ok(list) => list,
        Err(_) => return Ok(trimmed.to_string()),
    };
    select_languages(trimmed, &available)
}

fn select_languages(requested: &str, available: &[String]) -> Result<String> {
    let mut chosen = Vec::new();
    let mut missing = Vec::new();
    for raw in requested.split(['+', ',', ' ']) {
        let lang = raw.trim();
        if lang.is_empty() {
            continue;
        }
        if available.iter().any(|value| value == lang) {
            chosen.push(lang.to_string());
        } else {
            missing.push(lang.to_string());
        }
    }

    if chosen.is_empty() {
        return Err(anyhow!(
            "ocr language(s) not available: {} (available: {})",
            missing.join(", "),
            available.join(", ")
        ));
    }
    if !missing.is_empty() {
        warn!(
            "ocr language(s) not available: {} (available: {})",
            missing.join(", "),
            available.join(", ")
        );
    }

    Ok(chosen.join("+"))
}

pub(super) fn run_tesseract_tsv(path: &Path, languages: &str, psm: u32, dpi: u32) -> Result<String> {
    let output = Command::new("tesseract")
        .arg(path)
        .arg("stdout")
        .arg("-l")
        .arg(languages)
        .arg("--oem")
        .arg("1")
        .arg("--psm")
        .arg(psm.to_string())
        .arg("--dpi")
        .arg(dpi.to_string())
        .arg("tsv")
        .output()
        .with_context(|| "failed to run tesseract (is it installed?)")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("tesseract failed: {}", stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn language_list_skips_banner() {
        let stdout = "List of available languages in \"/usr/share/tessdata/\" (3):\neng\njpn\n\nosd\n";
        assert_eq!(parse_language_list(stdout), langs(&["eng", "jpn", "osd"]));
    }

    #[test]
    fn drops_missing_languages_but_keeps_available_ones() {
        let available = langs(&["eng", "jpn"]);
        assert_eq!(
            select_languages("eng+fra, jpn", &available).expect("select"),
            "eng+jpn"
        );
    }

    #[test]
    fn fails_when_no_requested_language_exists() {
        let available = langs(&["eng"]);
        let err = select_languages("fra", &available).expect_err("nothing available");
        assert!(err.to_string().contains("fra"));
    }
}
