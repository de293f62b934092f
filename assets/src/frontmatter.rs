/// Split a leading `---` YAML frontmatter block from a markdown
/// document. Returns `(metadata, body)`; a document without a valid
/// fence is all body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let Some(after_open) = text.strip_prefix("---\n") else {
        return (None, text);
    };
    let mut search_from = 0;
    while let Some(rel) = after_open[search_from..].find("\n---") {
        let idx = search_from + rel;
        let fence_end = idx + 4;
        // The closing fence must be a line of its own.
        match after_open.as_bytes().get(fence_end) {
            None => return (Some(&after_open[..idx]), ""),
            Some(b'\n') => {
                return (Some(&after_open[..idx]), &after_open[fence_end + 1..]);
            }
            _ => search_from = fence_end,
        }
    }
    (None, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splits_meta_and_body() {
        let doc = "---\ndescription: deploy helper\n---\nRun the deploy.\n";
        let (meta, body) = split_frontmatter(doc);
        assert_eq!(meta, Some("description: deploy helper"));
        assert_eq!(body, "Run the deploy.\n");
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let doc = "Just prose, no fences.";
        let (meta, body) = split_frontmatter(doc);
        assert!(meta.is_none());
        assert_eq!(body, doc);
    }

    #[test]
    fn test_unclosed_fence_is_all_body() {
        let doc = "---\ndescription: broken\nno closing fence";
        let (meta, body) = split_frontmatter(doc);
        assert!(meta.is_none());
        assert_eq!(body, doc);
    }

    #[test]
    fn test_fence_at_end_of_file() {
        let doc = "---\nname: bare\n---";
        let (meta, body) = split_frontmatter(doc);
        assert_eq!(meta, Some("name: bare"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_horizontal_rule_in_body_not_a_fence() {
        let doc = "---\nname: hr\n---\nabove\n\n---\n\nbelow\n";
        let (meta, body) = split_frontmatter(doc);
        assert_eq!(meta, Some("name: hr"));
        assert!(body.contains("below"));
    }

    #[test]
    fn test_dashes_inside_meta_value_ignored() {
        // "----" is not a closing fence.
        let doc = "---\nname: a\nnote: x----y\n---\nbody\n";
        let (meta, body) = split_frontmatter(doc);
        assert_eq!(meta, Some("name: a\nnote: x----y"));
        assert_eq!(body, "body\n");
    }
}
