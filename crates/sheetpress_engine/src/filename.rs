use sha2::{Digest, Sha256};

/// Content-addressed name for a stored artifact: `artifact-{short_hash}.pdf`.
pub fn artifact_filename(bytes: &[u8]) -> String {
    format!("artifact-{}.pdf", short_hash(bytes))
}

/// Windows-safe file name for a download target; falls back to `processed.pdf`.
pub fn download_filename(artifact_url: &str) -> String {
    let last_segment = artifact_url
        .split(['?', '#'])
        .next()
        .unwrap_or(artifact_url)
        .rsplit('/')
        .next()
        .unwrap_or("");
    let cleaned: String = last_segment
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() || is_reserved_windows_name(cleaned) {
        "processed.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

fn short_hash(input: &[u8]) -> String {
    let digest = Sha256::digest(input);
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
