//! Static inspection of submitted source code for constraint grading.
//!
//! The scanner is a heuristic text analysis, not a parser: it has to cope
//! with whatever language a class happens to teach, so it works off
//! keywords, brace structure and indentation. Detection answers three
//! questions per constraint: is the construct present, at what maximum
//! nesting depth (for loops and conditionals), and — for recursion — does
//! any defined function call itself.
//!
//! The findings only say what was observed. How much a violated constraint
//! costs is the grading policy's decision, made elsewhere.

use model::{CodeConstraint, CodeConstruct, ConstraintKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// What the scanner observed for a single constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintFinding {
    pub constraint: CodeConstraint,
    pub satisfied: bool,
    /// Maximum observed nesting depth, for constructs where depth means
    /// anything.
    pub observed_depth: Option<u32>,
    pub detail: String,
}

/// Evaluate every constraint of a task against one submitted source.
pub fn evaluate_all(source: &str, constraints: &[CodeConstraint]) -> Vec<ConstraintFinding> {
    constraints.iter().map(|c| evaluate(source, c)).collect()
}

pub fn evaluate(source: &str, constraint: &CodeConstraint) -> ConstraintFinding {
    let construct = constraint.construct();
    let present = construct_present(source, construct);
    let observed_depth = construct
        .supports_nesting()
        .then(|| max_nesting_depth(source, construct));

    let (satisfied, detail) = match constraint.kind() {
        ConstraintKind::Forbidden => {
            if present {
                (false, format!("{construct} is forbidden but was found"))
            } else {
                (true, format!("{construct} not present"))
            }
        }
        ConstraintKind::Required => {
            if !present {
                (false, format!("{construct} is required but was not found"))
            } else {
                match observed_depth {
                    Some(depth) => check_depth_bounds(constraint, depth),
                    None => (true, format!("{construct} found")),
                }
            }
        }
    };

    ConstraintFinding {
        constraint: *constraint,
        satisfied,
        observed_depth,
        detail,
    }
}

fn check_depth_bounds(constraint: &CodeConstraint, depth: u32) -> (bool, String) {
    let construct = constraint.construct();
    let min = constraint.min_nesting_depth();
    let max = constraint.max_nesting_depth();
    if min > 0 && depth < min {
        return (
            false,
            format!("{construct} nesting depth {depth} is below the required minimum {min}"),
        );
    }
    if max > 0 && depth > max {
        return (
            false,
            format!("{construct} nesting depth {depth} exceeds the allowed maximum {max}"),
        );
    }
    (true, format!("{construct} found at nesting depth {depth}"))
}

static ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[|\blist\s*\(|\bArrayList\b|\bvec!").expect("array pattern"));
static GLOBAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*global\s+\w|\bstatic\s+\w").expect("global pattern"));
static SORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bsorted?\s*\(|\bqsort\s*\(|\.sort\s*\(|\b(?:Arrays|Collections)\.sort\b")
        .expect("sort pattern")
});
static DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:def|fn|function)\s+([A-Za-z_]\w*)\s*\(").expect("def pattern")
});
// C/Java style: a return type followed by a name and a parameter list
// opening a block. Keyword-led statements (if/while/...) are filtered after
// capture.
static C_DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[A-Za-z_][\w:<>\[\]*&]*[ \t]+)+([A-Za-z_]\w*)\s*\([^;{}]*\)\s*\{")
        .expect("c-style def pattern")
});

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "switch", "return", "catch", "match",
];

fn keyword_present(source: &str, keyword: &str) -> bool {
    // \b{keyword}\b with a literal keyword; all vocabulary words are
    // regex-safe.
    Regex::new(&format!(r"\b{keyword}\b"))
        .expect("keyword pattern")
        .is_match(source)
}

fn construct_present(source: &str, construct: CodeConstruct) -> bool {
    match construct {
        CodeConstruct::ForLoop => keyword_present(source, "for"),
        CodeConstruct::WhileLoop => keyword_present(source, "while"),
        CodeConstruct::LoopAny => {
            keyword_present(source, "for") || keyword_present(source, "while")
        }
        CodeConstruct::IfElse => keyword_present(source, "if"),
        CodeConstruct::ArrayOrList => ARRAY_RE.is_match(source),
        CodeConstruct::GlobalVariable => GLOBAL_RE.is_match(source),
        CodeConstruct::BuiltInSort => SORT_RE.is_match(source),
        CodeConstruct::CustomFunction => defined_functions(source)
            .iter()
            .any(|f| f.name != "main"),
        CodeConstruct::Recursion => has_recursive_call(source),
    }
}

struct FunctionDef {
    name: String,
    /// Byte offset just past the definition header; the body is assumed to
    /// run from here to the next definition.
    body_start: usize,
}

fn defined_functions(source: &str) -> Vec<FunctionDef> {
    let mut defs: Vec<FunctionDef> = Vec::new();
    for captures in DEF_RE.captures_iter(source) {
        let m = captures.get(1).expect("def name group");
        defs.push(FunctionDef {
            name: m.as_str().to_string(),
            body_start: captures.get(0).expect("def match").end(),
        });
    }
    for captures in C_DEF_RE.captures_iter(source) {
        let m = captures.get(1).expect("c-style def name group");
        if CONTROL_KEYWORDS.contains(&m.as_str()) {
            continue;
        }
        defs.push(FunctionDef {
            name: m.as_str().to_string(),
            body_start: captures.get(0).expect("c-style def match").end(),
        });
    }
    defs.sort_by_key(|d| d.body_start);
    defs
}

/// A function calling itself anywhere between its header and the next
/// definition counts as recursion.
fn has_recursive_call(source: &str) -> bool {
    let defs = defined_functions(source);
    for (i, def) in defs.iter().enumerate() {
        let body_end = defs
            .get(i + 1)
            .map(|next| next.body_start)
            .unwrap_or(source.len());
        let body = &source[def.body_start..body_end.max(def.body_start)];
        let call = Regex::new(&format!(r"\b{}\s*\(", regex::escape(&def.name)))
            .expect("call pattern");
        if call.is_match(body) {
            return true;
        }
    }
    false
}

fn nesting_keywords(construct: CodeConstruct) -> &'static [&'static str] {
    match construct {
        CodeConstruct::ForLoop => &["for"],
        CodeConstruct::WhileLoop => &["while"],
        CodeConstruct::LoopAny => &["for", "while"],
        CodeConstruct::IfElse => &["if"],
        _ => &[],
    }
}

/// Maximum nesting depth of the construct's blocks: brace-counting for
/// brace languages, indentation tracking otherwise. `0` means not present.
fn max_nesting_depth(source: &str, construct: CodeConstruct) -> u32 {
    let keywords = nesting_keywords(construct);
    if keywords.is_empty() {
        return 0;
    }
    if source.contains('{') {
        brace_nesting(source, keywords)
    } else {
        indent_nesting(source, keywords)
    }
}

fn brace_nesting(source: &str, keywords: &[&str]) -> u32 {
    let mut block_is_construct: Vec<bool> = Vec::new();
    let mut construct_depth: u32 = 0;
    let mut max_depth: u32 = 0;
    let mut pending_construct = false;
    let mut word = String::new();

    for ch in source.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            if keywords.contains(&word.as_str()) {
                pending_construct = true;
            }
            word.clear();
        }
        match ch {
            '{' => {
                block_is_construct.push(pending_construct);
                if pending_construct {
                    construct_depth += 1;
                    max_depth = max_depth.max(construct_depth);
                }
                pending_construct = false;
            }
            '}' => {
                if block_is_construct.pop().unwrap_or(false) {
                    construct_depth = construct_depth.saturating_sub(1);
                }
            }
            _ => {}
        }
    }
    max_depth
}

fn indent_nesting(source: &str, keywords: &[&str]) -> u32 {
    let mut open_indents: Vec<usize> = Vec::new();
    let mut max_depth: u32 = 0;

    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        let indent = line.len() - trimmed.len();
        while open_indents.last().is_some_and(|&i| indent <= i) {
            open_indents.pop();
        }
        let first_word: String = trimmed
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if keywords.contains(&first_word.as_str()) {
            open_indents.push(indent);
            max_depth = max_depth.max(open_indents.len() as u32);
        }
    }
    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::ConstraintKind;

    const RECURSIVE_PY: &str = "\
def factorial(n):
    if n <= 1:
        return 1
    return n * factorial(n - 1)
";

    const ITERATIVE_PY: &str = "\
def factorial(n):
    result = 1
    while n > 1:
        result = result * n
        n = n - 1
    return result
";

    const NESTED_C: &str = "\
int main() {
    for (int i = 0; i < 10; i++) {
        for (int j = 0; j < 10; j++) {
            printf(\"%d\\n\", i * j);
        }
    }
    return 0;
}
";

    #[test]
    fn test_forbidden_recursion_flagged_on_self_call() {
        let constraint = CodeConstraint::forbidden(CodeConstruct::Recursion);
        let finding = evaluate(RECURSIVE_PY, &constraint);
        assert!(!finding.satisfied);
        assert!(finding.detail.contains("forbidden"));
    }

    #[test]
    fn test_forbidden_recursion_ok_without_self_call() {
        let constraint = CodeConstraint::forbidden(CodeConstruct::Recursion);
        assert!(evaluate(ITERATIVE_PY, &constraint).satisfied);
    }

    #[test]
    fn test_forbidden_depth_bounds_are_irrelevant() {
        // However the constraint was built, Forbidden only asks "present?".
        let constraint =
            CodeConstraint::new(ConstraintKind::Forbidden, CodeConstruct::WhileLoop, 3, 9)
                .unwrap();
        let finding = evaluate(ITERATIVE_PY, &constraint);
        assert!(!finding.satisfied);
        let finding = evaluate("x = 1", &constraint);
        assert!(finding.satisfied);
    }

    #[test]
    fn test_required_for_loop() {
        let constraint = CodeConstraint::required(CodeConstruct::ForLoop);
        assert!(evaluate(NESTED_C, &constraint).satisfied);
        let finding = evaluate(ITERATIVE_PY, &constraint);
        assert!(!finding.satisfied);
        assert!(finding.detail.contains("not found"));
    }

    #[test]
    fn test_brace_nesting_depth() {
        let constraint =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::ForLoop, 2, 0).unwrap();
        let finding = evaluate(NESTED_C, &constraint);
        assert!(finding.satisfied);
        assert_eq!(finding.observed_depth, Some(2));

        let deeper =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::ForLoop, 3, 0).unwrap();
        assert!(!evaluate(NESTED_C, &deeper).satisfied);
    }

    #[test]
    fn test_max_depth_bound_violated() {
        let constraint =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::ForLoop, 0, 1).unwrap();
        let finding = evaluate(NESTED_C, &constraint);
        assert!(!finding.satisfied);
        assert!(finding.detail.contains("exceeds"));
    }

    #[test]
    fn test_indent_nesting_depth() {
        let source = "\
for i in range(3):
    for j in range(3):
        if i == j:
            print(i)
";
        let loops =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::LoopAny, 2, 2).unwrap();
        let finding = evaluate(source, &loops);
        assert!(finding.satisfied);
        assert_eq!(finding.observed_depth, Some(2));

        // The conditional sits at depth 1 of its own construct kind.
        let cond =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::IfElse, 1, 1).unwrap();
        assert!(evaluate(source, &cond).satisfied);
    }

    #[test]
    fn test_sibling_blocks_do_not_stack() {
        let source = "\
while a:
    x = 1
while b:
    y = 2
";
        let constraint =
            CodeConstraint::new(ConstraintKind::Required, CodeConstruct::WhileLoop, 2, 0)
                .unwrap();
        let finding = evaluate(source, &constraint);
        assert!(!finding.satisfied);
        assert_eq!(finding.observed_depth, Some(1));
    }

    #[test]
    fn test_custom_function_ignores_main() {
        let constraint = CodeConstraint::required(CodeConstruct::CustomFunction);
        assert!(!evaluate(NESTED_C, &constraint).satisfied);
        assert!(evaluate(RECURSIVE_PY, &constraint).satisfied);
    }

    #[test]
    fn test_builtin_sort_detection() {
        let constraint = CodeConstraint::forbidden(CodeConstruct::BuiltInSort);
        assert!(!evaluate("nums.sort()", &constraint).satisfied);
        assert!(!evaluate("print(sorted(xs))", &constraint).satisfied);
        assert!(!evaluate("Collections.sort(list);", &constraint).satisfied);
        assert!(evaluate("bubble(xs)", &constraint).satisfied);
    }

    #[test]
    fn test_global_variable_detection() {
        let constraint = CodeConstraint::forbidden(CodeConstruct::GlobalVariable);
        assert!(!evaluate("def f():\n    global counter\n    counter = 1", &constraint).satisfied);
        assert!(!evaluate("static int counter = 0;", &constraint).satisfied);
        assert!(evaluate("counter = 0", &constraint).satisfied);
    }

    #[test]
    fn test_array_or_list_detection() {
        let constraint = CodeConstraint::required(CodeConstruct::ArrayOrList);
        assert!(evaluate("xs = [1, 2, 3]", &constraint).satisfied);
        assert!(evaluate("let v = vec![0; 8];", &constraint).satisfied);
        assert!(!evaluate("x = 1\ny = 2", &constraint).satisfied);
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        // "formula" and "whiled" must not read as loops.
        let constraint = CodeConstraint::required(CodeConstruct::LoopAny);
        assert!(!evaluate("formula = whiled + 1", &constraint).satisfied);
    }

    #[test]
    fn test_evaluate_all_keeps_constraint_order() {
        let constraints = vec![
            CodeConstraint::required(CodeConstruct::ForLoop),
            CodeConstraint::forbidden(CodeConstruct::Recursion),
        ];
        let findings = evaluate_all(NESTED_C, &constraints);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].constraint.construct(), CodeConstruct::ForLoop);
        assert!(findings[0].satisfied);
        assert!(findings[1].satisfied);
    }
}
