// src/config/file.rs
//
// `key = value` run configuration. Lines starting with '#' are comments,
// and so is a `#` standing alone after whitespace (`#2` stays in the value).
// Values layer over whatever options they are applied to, so the usual
// order is: defaults → config file → command line.
//
//   input = attached_assets/questoes.xlsx
//   format = grouped
//   mode = strict
//   limit = 100
//   ts_out =            # empty disables the literal file

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::DEFAULT_CONFIG_FILE;
use super::options::AppOptions;
use crate::error::{Error, Result};

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_num<T: FromStr>(line: usize, key: &str, val: &str) -> Result<T> {
    val.parse::<T>().map_err(|_| Error::Config {
        line,
        msg: format!("{key}: expected a number, got {val:?}"),
    })
}

/// Value text with any trailing ` # comment` removed.
fn strip_comment(val: &str) -> &str {
    let val = val.trim();
    if val.starts_with('#') {
        return "";
    }
    let bytes = val.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        let after_space = i > 0 && bytes[i - 1].is_ascii_whitespace();
        let then_space = bytes.get(i + 1).is_none_or(|n| n.is_ascii_whitespace());
        if *b == b'#' && after_space && then_space {
            return val[..i].trim_end();
        }
    }
    val
}

fn opt_path(val: &str) -> Option<PathBuf> {
    if val.is_empty() { None } else { Some(PathBuf::from(val)) }
}

/// Apply every `key = value` line in `text` onto `opts`.
pub fn apply_str(text: &str, mut opts: AppOptions) -> Result<AppOptions> {
    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        let Some(eq) = line.find('=') else {
            return Err(Error::Config { line: line_no, msg: format!("expected key = value, got {line:?}") });
        };
        let key = line[..eq].trim();
        let val = strip_comment(&line[eq + 1..]);

        let bad = |what: &str| Error::Config { line: line_no, msg: format!("{key}: {what}") };

        match key {
            "input" => opts.input.path = PathBuf::from(val),
            "sheet" => opts.input.sheet = (!val.is_empty()).then(|| s!(val)),
            "format" => opts.normalize.format = val.parse().map_err(|e: String| bad(&e))?,
            "mode" => opts.normalize.mode = Some(val.parse().map_err(|e: String| bad(&e))?),
            "difficulty" => opts.normalize.difficulty = parse_num(line_no, key, val)?,
            "default_category" => opts.normalize.default_category = s!(val),
            "default_challenge" => opts.normalize.default_challenge = val.parse().map_err(|e: String| bad(&e))?,
            "limit" => {
                opts.normalize.limit = if val.is_empty() { None } else { Some(parse_num(line_no, key, val)?) }
            }
            "json_out" => opts.export.json_path = opt_path(val),
            "ts_out" => opts.export.ts_path = opt_path(val),
            "const_name" => opts.export.literal.const_name = s!(val),
            "typed" => opts.export.literal.typed = parse_bool(val).ok_or_else(|| bad("expected true/false"))?,
            "header_comment" => {
                opts.export.literal.header_comment = parse_bool(val).ok_or_else(|| bad("expected true/false"))?
            }
            "truncate" => {
                opts.export.literal.truncate_text = if val.is_empty() { None } else { Some(parse_num(line_no, key, val)?) }
            }
            "sample_target" => opts.sample.target = parse_num(line_no, key, val)?,
            "sample_min" => opts.sample.min_per_category = parse_num(line_no, key, val)?,
            "sample_max" => opts.sample.max_per_category = parse_num(line_no, key, val)?,
            "sample_minority" => {
                opts.sample.include_minority = parse_bool(val).ok_or_else(|| bad("expected true/false"))?
            }
            "sample_out" => opts.sample.out_path = PathBuf::from(val),
            other => logw!("config line {}: unknown key {:?} ignored", line_no, other),
        }
    }
    Ok(opts)
}

pub fn apply_path(path: &Path, opts: AppOptions) -> Result<AppOptions> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    logf!("loaded config from {}", path.display());
    apply_str(&text, opts)
}

/// Explicit path: must exist. No path: use `oabq.conf` if present.
pub fn load(explicit: Option<&Path>) -> Result<AppOptions> {
    let base = AppOptions::default();
    match explicit {
        Some(p) => apply_path(p, base),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { apply_path(p, base) } else { Ok(base) }
        }
    }
}
