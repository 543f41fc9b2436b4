//! The enumerated rewrite table.
//!
//! Every rule is named after the flat selector it produces, so a regex rule
//! and the literal rule for the same nested selector share a name. Order
//! matters in both tables: later rules assume earlier ones already ran.

use regex::Regex;

use crate::error::Result;

/// A pattern rule, applied to every match in the style block.
#[derive(Clone, Copy, Debug)]
pub struct RegexRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// An exact-substring rule, applied to the first occurrence only.
#[derive(Clone, Copy, Debug)]
pub struct LiteralRule {
    pub name: &'static str,
    pub find: &'static str,
    pub replace: &'static str,
}

/// Parent-anchored rules for the first nested selector of each group.
///
/// `[^}]*?` keeps a match inside the parent's own declarations, and the
/// `\s*` before `&` absorbs whatever indentation the nested rule has. On
/// two-space indented input each rule yields the same text as its literal
/// counterpart below.
pub const REGEX_RULES: &[RegexRule] = &[
    RegexRule {
        name: ".section-badge.active",
        pattern: r"\.section-badge \{([^}]*?)\s*&\.active \{",
        replacement: ".section-badge {${1}\n}\n\n.section-badge.active {",
    },
    RegexRule {
        name: ".form-item:last-child",
        pattern: r"\.form-item \{([^}]*?)\s*&:last-child \{",
        replacement: ".form-item {${1}\n}\n\n.form-item:last-child {",
    },
    RegexRule {
        name: ".form-input:focus",
        pattern: r"\.form-input \{([^}]*?)\s*&:focus \{",
        replacement: ".form-input {${1}\n}\n\n.form-input:focus {",
    },
    RegexRule {
        name: ".section-actions button.test-btn",
        pattern: r"(\.section-actions[^{]*\{[^}]*?button \{[^}]*?)\s*&\.test-btn \{",
        replacement: "${1}\n  }\n}\n\n.section-actions button.test-btn {",
    },
    RegexRule {
        name: ".template-item:last-child",
        pattern: r"\.template-item \{([^}]*?)\s*&:last-child \{",
        replacement: ".template-item {${1}\n}\n\n.template-item:last-child {",
    },
    RegexRule {
        name: ".info-item:last-child",
        pattern: r"\.info-item \{([^}]*?)\s*&:last-child \{",
        replacement: ".info-item {${1}\n}\n\n.info-item:last-child {",
    },
    RegexRule {
        name: ".template-editor button.cancel-btn",
        pattern: r"(\.template-editor[^{]*\{[^}]*?button \{[^}]*?)\s*&\.cancel-btn \{",
        replacement: "${1}\n  }\n}\n\n.template-editor button.cancel-btn {",
    },
];

/// Literal rules, one per nested selector in the component.
///
/// `  &:last-child {` and `    &.save-btn.primary {` each appear for more
/// than one parent. Those entries are listed in document order of their
/// parents, so the n-th entry consumes the n-th remaining occurrence.
pub const LITERAL_RULES: &[LiteralRule] = &[
    // section-badge
    LiteralRule {
        name: ".section-badge.active",
        find: "  &.active {",
        replace: "}\n\n.section-badge.active {",
    },
    LiteralRule {
        name: ".section-badge.inactive",
        find: "  &.inactive {",
        replace: "}\n\n.section-badge.inactive {",
    },
    // form-item
    LiteralRule {
        name: ".form-item:last-child",
        find: "  &:last-child {",
        replace: "}\n\n.form-item:last-child {",
    },
    // form-input
    LiteralRule {
        name: ".form-input:focus",
        find: "  &:focus {",
        replace: "}\n\n.form-input:focus {",
    },
    // section-actions button
    LiteralRule {
        name: ".section-actions button.test-btn",
        find: "    &.test-btn {",
        replace: "  }\n}\n\n.section-actions button.test-btn {",
    },
    LiteralRule {
        name: ".section-actions button.backup-btn",
        find: "    &.backup-btn {",
        replace: "}\n\n.section-actions button.backup-btn {",
    },
    LiteralRule {
        name: ".section-actions button.save-btn.primary",
        find: "    &.save-btn.primary {",
        replace: "}\n\n.section-actions button.save-btn.primary {",
    },
    LiteralRule {
        name: ".section-actions button:disabled",
        find: "    &:disabled {",
        replace: "}\n\n.section-actions button:disabled {",
    },
    // template-item
    LiteralRule {
        name: ".template-item:last-child",
        find: "  &:last-child {",
        replace: "}\n\n.template-item:last-child {",
    },
    // info-item
    LiteralRule {
        name: ".info-item:last-child",
        find: "  &:last-child {",
        replace: "}\n\n.info-item:last-child {",
    },
    // template-editor button
    LiteralRule {
        name: ".template-editor button.cancel-btn",
        find: "    &.cancel-btn {",
        replace: "  }\n}\n\n.template-editor button.cancel-btn {",
    },
    LiteralRule {
        name: ".template-editor button.save-btn.primary",
        find: "    &.save-btn.primary {",
        replace: "}\n\n.template-editor button.save-btn.primary {",
    },
];

/// Three closing braces with only whitespace between them.
pub const TRIPLE_CLOSE_PATTERN: &str = r"\}\s*\}\s*\}";

/// A [`RegexRule`] with its pattern compiled.
#[derive(Debug)]
pub struct CompiledRegexRule {
    pub name: &'static str,
    pub regex: Regex,
    pub replacement: &'static str,
}

/// Both rule tables and the brace-collapse pattern, compiled once per run.
#[derive(Debug)]
pub struct RuleSet {
    pub regex_rules: Vec<CompiledRegexRule>,
    pub literal_rules: &'static [LiteralRule],
    pub triple_close: Regex,
}

impl RuleSet {
    /// Compile [`REGEX_RULES`] and [`TRIPLE_CLOSE_PATTERN`].
    ///
    /// Fails with [`crate::Error::Pattern`] if a table pattern is invalid.
    pub fn compile() -> Result<Self> {
        let regex_rules = REGEX_RULES
            .iter()
            .map(|rule| -> Result<CompiledRegexRule> {
                Ok(CompiledRegexRule {
                    name: rule.name,
                    regex: Regex::new(rule.pattern)?,
                    replacement: rule.replacement,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            regex_rules,
            literal_rules: LITERAL_RULES,
            triple_close: Regex::new(TRIPLE_CLOSE_PATTERN)?,
        })
    }
}
