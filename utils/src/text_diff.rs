enum DiffOp<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

impl DiffOp<'_> {
    fn is_change(&self) -> bool {
        !matches!(self, DiffOp::Equal(_))
    }

    fn consumes_from(&self) -> bool {
        matches!(self, DiffOp::Equal(_) | DiffOp::Delete(_))
    }

    fn consumes_to(&self) -> bool {
        matches!(self, DiffOp::Equal(_) | DiffOp::Insert(_))
    }
}

/// Line-level unified diff of `from` against `to`.
///
/// Produces `--- {from_label}` / `+++ {to_label}` headers followed by
/// `@@ -a,b +c,d @@` hunks with `context` lines of surrounding context.
/// Returns an empty string when the inputs are line-identical.
pub fn unified_diff(
    from: &str,
    to: &str,
    from_label: &str,
    to_label: &str,
    context: usize,
) -> String {
    let from_lines: Vec<&str> = from.lines().collect();
    let to_lines: Vec<&str> = to.lines().collect();
    let ops = diff_ops(&from_lines, &to_lines);

    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_change())
        .map(|(i, _)| i)
        .collect();
    if changes.is_empty() {
        return String::new();
    }

    // Changes closer together than two context windows share a hunk.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut start = changes[0];
    let mut prev = changes[0];
    for &i in &changes[1..] {
        if i - prev > 2 * context {
            groups.push((start, prev));
            start = i;
        }
        prev = i;
    }
    groups.push((start, prev));

    // Lines of each side consumed before op i, for hunk offsets.
    let mut from_pos = vec![0usize; ops.len() + 1];
    let mut to_pos = vec![0usize; ops.len() + 1];
    for (i, op) in ops.iter().enumerate() {
        from_pos[i + 1] = from_pos[i] + op.consumes_from() as usize;
        to_pos[i + 1] = to_pos[i] + op.consumes_to() as usize;
    }

    let mut out = format!("--- {}\n+++ {}\n", from_label, to_label);
    for (first, last) in groups {
        let lo = first.saturating_sub(context);
        let hi = (last + context).min(ops.len() - 1);
        let from_count = from_pos[hi + 1] - from_pos[lo];
        let to_count = to_pos[hi + 1] - to_pos[lo];
        let from_start = if from_count == 0 {
            from_pos[lo]
        } else {
            from_pos[lo] + 1
        };
        let to_start = if to_count == 0 {
            to_pos[lo]
        } else {
            to_pos[lo] + 1
        };
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            from_start, from_count, to_start, to_count
        ));
        for op in &ops[lo..=hi] {
            let (prefix, line) = match op {
                DiffOp::Equal(line) => (' ', line),
                DiffOp::Delete(line) => ('-', line),
                DiffOp::Insert(line) => ('+', line),
            };
            out.push(prefix);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Edit script via longest-common-subsequence over lines. Inputs here are
/// canonical manifest renderings, small enough for the quadratic table.
fn diff_ops<'a>(from: &[&'a str], to: &[&'a str]) -> Vec<DiffOp<'a>> {
    let m = from.len();
    let n = to.len();
    let mut lcs = vec![vec![0usize; n + 1]; m + 1];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            lcs[i][j] = if from[i] == to[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        if from[i] == to[j] {
            ops.push(DiffOp::Equal(from[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(DiffOp::Delete(from[i]));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(to[j]));
            j += 1;
        }
    }
    while i < m {
        ops.push(DiffOp::Delete(from[i]));
        i += 1;
    }
    while j < n {
        ops.push(DiffOp::Insert(to[j]));
        j += 1;
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_inputs_produce_empty_diff() {
        assert_eq!(unified_diff("a\nb\n", "a\nb\n", "target", "current", 3), "");
    }

    #[test]
    fn test_single_line_change() {
        let from = "replicas: 2\n";
        let to = "replicas: 3\n";
        let diff = unified_diff(from, to, "target", "current", 3);
        assert_eq!(
            diff,
            "--- target\n+++ current\n@@ -1,1 +1,1 @@\n-replicas: 2\n+replicas: 3\n"
        );
    }

    #[test]
    fn test_change_in_context() {
        let from = "a\nb\nc\nd\ne\n";
        let to = "a\nb\nX\nd\ne\n";
        let diff = unified_diff(from, to, "target", "current", 1);
        assert_eq!(
            diff,
            "--- target\n+++ current\n@@ -2,3 +2,3 @@\n b\n-c\n+X\n d\n"
        );
    }

    #[test]
    fn test_distant_changes_produce_separate_hunks() {
        let from = "a\nb\nc\nd\ne\nf\ng\nh\ni\n";
        let to = "A\nb\nc\nd\ne\nf\ng\nh\nI\n";
        let diff = unified_diff(from, to, "target", "current", 1);
        assert_eq!(
            diff,
            "--- target\n+++ current\n\
             @@ -1,2 +1,2 @@\n-a\n+A\n b\n\
             @@ -8,2 +8,2 @@\n h\n-i\n+I\n"
        );
    }

    #[test]
    fn test_pure_insertion() {
        let from = "a\nb\n";
        let to = "a\nnew\nb\n";
        let diff = unified_diff(from, to, "target", "current", 1);
        assert_eq!(
            diff,
            "--- target\n+++ current\n@@ -1,2 +1,3 @@\n a\n+new\n b\n"
        );
    }

    #[test]
    fn test_insertion_into_empty_input() {
        let diff = unified_diff("", "a\nb\n", "target", "current", 3);
        assert_eq!(diff, "--- target\n+++ current\n@@ -0,0 +1,2 @@\n+a\n+b\n");
    }

    #[test]
    fn test_orientation_is_from_target_to_current() {
        let diff = unified_diff("old\n", "new\n", "target", "current", 3);
        assert!(diff.contains("-old"));
        assert!(diff.contains("+new"));
    }
}
