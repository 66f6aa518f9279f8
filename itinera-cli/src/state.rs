use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// `$ITINERA_HOME` when set, otherwise `~/.itinera`. Never created here.
pub fn itinera_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("ITINERA_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").context("neither ITINERA_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".itinera"))
}

/// Plan or estimate text; `-` reads stdin so LLM output can be piped in.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
