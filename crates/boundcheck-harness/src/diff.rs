//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let rows = expected_lines.len().max(actual_lines.len());
    for i in 0..rows {
        let e = expected_lines.get(i).copied();
        let a = actual_lines.get(i).copied();
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            if let Some(e) = e {
                out.push_str(&format!("-{e}\n"));
            }
            if let Some(a) = a {
                out.push_str(&format!("+{a}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        assert_eq!(render_diff("err:34", "err:34"), "[identical]");
    }

    #[test]
    fn single_line_change() {
        let diff = render_diff("err:34", "err:75");
        assert!(diff.contains("@@ line 1 @@\n-err:34\n+err:75\n"));
    }

    #[test]
    fn missing_trailing_line_is_shown() {
        let diff = render_diff("a\nb", "a");
        assert!(diff.contains("@@ line 2 @@\n-b\n"));
    }
}
