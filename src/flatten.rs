//! Selector flattening for the scoped style block of a single-file component.

use std::fs;
use std::ops::Range;
use std::path::Path;

use memchr::memmem;

use crate::error::Result;
use crate::rules::RuleSet;

/// Opening marker of the style block.
pub const STYLE_OPEN: &str = "<style lang=\"css\" scoped>";
/// Closing marker of the style block.
pub const STYLE_CLOSE: &str = "</style>";

/// Default target, relative to the working directory.
pub const DEFAULT_TARGET: &str = "index.vue";

/// What happened to the target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The style block was rewritten and the file written back.
    Flattened(FlattenReport),
    /// A marker was missing; the file was left untouched.
    StyleSectionNotFound,
}

impl Outcome {
    /// The status line printed by the command line tool.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Flattened(_) => "CSS fixes applied successfully!",
            Outcome::StyleSectionNotFound => "Could not find style section!",
        }
    }
}

/// Counters collected while flattening one style block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    pub regex_replacements: usize,
    pub literal_replacements: usize,
    /// Literal rules that found nothing, and whose regex rule found nothing either.
    pub skipped: Vec<&'static str>,
    pub triples_collapsed: usize,
    pub stray_braces_dropped: usize,
}

/// Byte range of the style block, both markers included.
pub fn locate_style_block(doc: &str) -> Option<Range<usize>> {
    let bytes = doc.as_bytes();
    let start = memmem::find(bytes, STYLE_OPEN.as_bytes())?;
    let close = memmem::find(&bytes[start..], STYLE_CLOSE.as_bytes())?;
    Some(start..start + close + STYLE_CLOSE.len())
}

/// Apply both rule passes and the brace cleanup to a style block.
pub fn flatten_style_block(block: &str, rules: &RuleSet) -> (String, FlattenReport) {
    let mut report = FlattenReport::default();
    let mut fired: Vec<&'static str> = Vec::new();
    let mut text = block.to_owned();

    for rule in &rules.regex_rules {
        let hits = rule.regex.find_iter(&text).count();
        if hits == 0 {
            log::debug!("regex rule {} matched nothing", rule.name);
            continue;
        }
        text = rule
            .regex
            .replace_all(&text, rule.replacement)
            .into_owned();
        log::debug!("regex rule {} replaced {} match(es)", rule.name, hits);
        report.regex_replacements += hits;
        fired.push(rule.name);
    }

    for rule in rules.literal_rules {
        // Its selector is already flat; a shared literal left in the text
        // belongs to a later parent.
        if fired.contains(&rule.name) {
            log::debug!("literal rule {} already handled by regex", rule.name);
            continue;
        }
        match text.find(rule.find) {
            Some(pos) => {
                text.replace_range(pos..pos + rule.find.len(), rule.replace);
                log::debug!("literal rule {} applied at byte {}", rule.name, pos);
                report.literal_replacements += 1;
                fired.push(rule.name);
            }
            None => {
                log::debug!("literal rule {} did not fire", rule.name);
                report.skipped.push(rule.name);
            }
        }
    }

    report.triples_collapsed = rules.triple_close.find_iter(&text).count();
    if report.triples_collapsed > 0 {
        text = rules.triple_close.replace_all(&text, "}").into_owned();
    }

    if !fired.is_empty() {
        let (flat, dropped) = drop_stray_closers(&text);
        text = flat;
        report.stray_braces_dropped = dropped;
    }

    if text.contains('&') {
        log::warn!("style block still contains '&' after flattening");
    }

    (text, report)
}

/// Rewrite the style block of `doc`, leaving everything around it as is.
///
/// Returns `None` when either marker is missing.
pub fn flatten_document(doc: &str, rules: &RuleSet) -> Option<(String, FlattenReport)> {
    let range = locate_style_block(doc)?;
    let (block, report) = flatten_style_block(&doc[range.clone()], rules);

    let mut out = String::with_capacity(doc.len() + block.len() - range.len());
    out.push_str(&doc[..range.start]);
    out.push_str(&block);
    out.push_str(&doc[range.end..]);
    Some((out, report))
}

/// Flatten the file at `input` and write the result to `output`, or back
/// over `input` when no output is given.
pub fn flatten_file(input: &Path, output: Option<&Path>) -> Result<Outcome> {
    let rules = RuleSet::compile()?;
    let src = fs::read_to_string(input)?;

    let Some((out, report)) = flatten_document(&src, &rules) else {
        log::info!("no style section in {}", input.display());
        return Ok(Outcome::StyleSectionNotFound);
    };

    let out_path = output.unwrap_or(input);
    fs::write(out_path, out)?;
    log::info!(
        "{}: {} regex and {} literal replacement(s), {} rule(s) skipped, {} brace(s) removed",
        out_path.display(),
        report.regex_replacements,
        report.literal_replacements,
        report.skipped.len(),
        report.triples_collapsed * 2 + report.stray_braces_dropped,
    );
    Ok(Outcome::Flattened(report))
}

/// Drop every `}` that has no matching `{`, together with the whitespace
/// right before it.
///
/// These are the parent closers left over once a replacement has already
/// closed the parent rule. Braces inside quoted strings and `/* */`
/// comments are copied through without being counted.
fn drop_stray_closers(block: &str) -> (String, usize) {
    let mut out = String::with_capacity(block.len());
    let mut depth = 0usize;
    let mut dropped = 0usize;
    let mut quote: Option<char> = None;
    let mut in_comment = false;
    let mut chars = block.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_comment {
            out.push(ch);
            if ch == '*' && chars.peek() == Some(&'/') {
                out.push('/');
                chars.next();
                in_comment = false;
            }
            continue;
        }
        if let Some(q) = quote {
            out.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'*') => {
                out.push_str("/*");
                chars.next();
                in_comment = true;
            }
            '{' => {
                depth += 1;
                out.push(ch);
            }
            '}' if depth == 0 => {
                let kept = out.trim_end().len();
                out.truncate(kept);
                dropped += 1;
            }
            '}' => {
                depth -= 1;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    (out, dropped)
}
