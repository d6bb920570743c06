//! Character-level semantic cleanup.
//!
//! A minimal character diff of two sentences is usually unreadable: it
//! matches stray letters across unrelated words and leaves one-character
//! islands of "unchanged" text. Three passes turn it into something a reader
//! expects:
//!
//! 1. equality elimination: a short equal segment dwarfed by edits on both
//!    sides is folded into those edits;
//! 2. merge: consecutive edits collapse into one delete plus one insert, with
//!    any shared prefix or suffix moved back out into equal text;
//! 3. boundary shifting: a lone edit between two equal segments slides to the
//!    placement whose edges best match word, line, or blank-line breaks.
//!
//! None of the passes changes what the script transforms old text into.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tag {
    Equal,
    Delete,
    Insert,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    pub tag: Tag,
    pub text: Vec<char>,
}

impl Segment {
    pub(crate) fn new(tag: Tag, text: Vec<char>) -> Self {
        Self { tag, text }
    }
}

pub(crate) fn cleanup_semantic(segments: &mut Vec<Segment>) {
    eliminate_equalities(segments);
    merge(segments);
    shift_to_boundaries(segments);
}

fn eliminate_equalities(segments: &mut Vec<Segment>) {
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    // Edit lengths before and after the most recent equality.
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);

    let mut i = 0;
    while i < segments.len() {
        let len = segments[i].text.len();
        if segments[i].tag == Tag::Equal {
            equalities.push(i);
            ins_before = ins_after;
            del_before = del_after;
            ins_after = 0;
            del_after = 0;
            last_equality = Some(len);
            i += 1;
            continue;
        }

        if segments[i].tag == Tag::Insert {
            ins_after += len;
        } else {
            del_after += len;
        }

        let swallowed = last_equality.is_some_and(|eq| {
            eq <= ins_before.max(del_before) && eq <= ins_after.max(del_after)
        });
        if !swallowed {
            i += 1;
            continue;
        }

        if let Some(at) = equalities.pop() {
            let text = segments[at].text.clone();
            segments[at].tag = Tag::Insert;
            segments.insert(at, Segment::new(Tag::Delete, text));
        }
        // The equality before it must be looked at again.
        equalities.pop();
        i = equalities.last().map_or(0, |&p| p + 1);
        ins_before = 0;
        del_before = 0;
        ins_after = 0;
        del_after = 0;
        last_equality = None;
    }
}

fn merge(segments: &mut Vec<Segment>) {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        if segments[i].tag == Tag::Equal {
            push_equal(&mut out, &segments[i].text);
            i += 1;
            continue;
        }

        let mut deleted = Vec::new();
        let mut inserted = Vec::new();
        while i < segments.len() && segments[i].tag != Tag::Equal {
            if segments[i].tag == Tag::Delete {
                deleted.extend_from_slice(&segments[i].text);
            } else {
                inserted.extend_from_slice(&segments[i].text);
            }
            i += 1;
        }

        let prefix = common_prefix(&deleted, &inserted);
        if prefix > 0 {
            push_equal(&mut out, &deleted[..prefix]);
            deleted.drain(..prefix);
            inserted.drain(..prefix);
        }
        let suffix = common_suffix(&deleted, &inserted);
        let tail = deleted[deleted.len() - suffix..].to_vec();
        deleted.truncate(deleted.len() - suffix);
        inserted.truncate(inserted.len() - suffix);

        if !deleted.is_empty() {
            out.push(Segment::new(Tag::Delete, deleted));
        }
        if !inserted.is_empty() {
            out.push(Segment::new(Tag::Insert, inserted));
        }
        push_equal(&mut out, &tail);
    }
    *segments = out;
}

fn push_equal(out: &mut Vec<Segment>, text: &[char]) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.tag == Tag::Equal => last.text.extend_from_slice(text),
        _ => out.push(Segment::new(Tag::Equal, text.to_vec())),
    }
}

fn shift_to_boundaries(segments: &mut Vec<Segment>) {
    let mut i = 1;
    while i + 1 < segments.len() {
        let lone_edit = segments[i - 1].tag == Tag::Equal
            && segments[i + 1].tag == Tag::Equal
            && segments[i].tag != Tag::Equal;
        if !lone_edit {
            i += 1;
            continue;
        }

        let before = &segments[i - 1].text;
        let edit = &segments[i].text;
        let len = edit.len();
        let text = [before.as_slice(), edit.as_slice(), segments[i + 1].text.as_slice()].concat();
        let score_at = |start: usize| {
            boundary_score(&text[..start], &text[start..start + len])
                + boundary_score(&text[start..start + len], &text[start + len..])
        };

        // Slide as far left as possible first, then step right one char at
        // a time, keeping the best placement.
        let mut start = before.len() - common_suffix(before, edit);
        let mut best_start = start;
        let mut best_score = score_at(start);
        while len > 0 && start + len < text.len() && text[start] == text[start + len] {
            start += 1;
            let score = score_at(start);
            if score >= best_score {
                best_score = score;
                best_start = start;
            }
        }

        if best_start == segments[i - 1].text.len() {
            i += 1;
            continue;
        }
        let best_before = text[..best_start].to_vec();
        let best_edit = text[best_start..best_start + len].to_vec();
        let best_after = text[best_start + len..].to_vec();

        let mut removed = 0;
        segments[i].text = best_edit;
        if best_after.is_empty() {
            segments.remove(i + 1);
            removed += 1;
        } else {
            segments[i + 1].text = best_after;
        }
        if best_before.is_empty() {
            segments.remove(i - 1);
            removed += 1;
        } else {
            segments[i - 1].text = best_before;
        }
        i = (i + 1).saturating_sub(removed).max(1);
    }
}

/// How natural a cut between `one` and `two` is, from 6 (text edge) down
/// to 0 (inside a word).
fn boundary_score(one: &[char], two: &[char]) -> u32 {
    let (Some(&c1), Some(&c2)) = (one.last(), two.first()) else {
        return 6;
    };

    let non_alnum1 = !c1.is_alphanumeric();
    let non_alnum2 = !c2.is_alphanumeric();
    let space1 = non_alnum1 && c1.is_whitespace();
    let space2 = non_alnum2 && c2.is_whitespace();
    let break1 = space1 && matches!(c1, '\n' | '\r');
    let break2 = space2 && matches!(c2, '\n' | '\r');
    let blank1 = break1 && ends_with_blank_line(one);
    let blank2 = break2 && starts_with_blank_line(two);

    if blank1 || blank2 {
        5
    } else if break1 || break2 {
        4
    } else if non_alnum1 && !space1 && space2 {
        // End of a sentence.
        3
    } else if space1 || space2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

fn starts_with_blank_line(text: &[char]) -> bool {
    matches!(
        text,
        ['\n', '\n', ..] | ['\n', '\r', '\n', ..] | ['\r', '\n', '\n', ..] | ['\r', '\n', '\r', '\n', ..]
    )
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(tag: Tag, text: &str) -> Segment {
        Segment::new(tag, text.chars().collect())
    }

    #[test]
    fn short_equality_between_edits_is_folded() {
        let mut segments = vec![
            seg(Tag::Delete, "ab"),
            seg(Tag::Equal, "cd"),
            seg(Tag::Delete, "e"),
            seg(Tag::Equal, "f"),
            seg(Tag::Insert, "g"),
        ];
        cleanup_semantic(&mut segments);
        assert_eq!(
            segments,
            vec![seg(Tag::Delete, "abcdef"), seg(Tag::Insert, "cdfg")]
        );
    }

    #[test]
    fn long_equality_survives() {
        let mut segments = vec![
            seg(Tag::Delete, "a"),
            seg(Tag::Equal, "bcdef"),
            seg(Tag::Insert, "g"),
        ];
        let expected = segments.clone();
        cleanup_semantic(&mut segments);
        assert_eq!(segments, expected);
    }

    #[test]
    fn merge_factors_shared_prefix_and_suffix() {
        let mut segments = vec![
            seg(Tag::Equal, "x"),
            seg(Tag::Delete, "abc"),
            seg(Tag::Insert, "abzc"),
            seg(Tag::Equal, "y"),
        ];
        merge(&mut segments);
        assert_eq!(
            segments,
            vec![
                seg(Tag::Equal, "xab"),
                seg(Tag::Insert, "z"),
                seg(Tag::Equal, "cy"),
            ]
        );
    }

    #[test]
    fn lone_edit_moves_to_blank_line() {
        let mut segments = vec![
            seg(Tag::Equal, "AAA\r\n\r\nBBB"),
            seg(Tag::Insert, "\r\nDDD\r\n\r\nBBB"),
            seg(Tag::Equal, "\r\nEEE"),
        ];
        shift_to_boundaries(&mut segments);
        assert_eq!(
            segments,
            vec![
                seg(Tag::Equal, "AAA\r\n\r\n"),
                seg(Tag::Insert, "BBB\r\nDDD\r\n\r\n"),
                seg(Tag::Equal, "BBB\r\nEEE"),
            ]
        );
    }

    #[test]
    fn lone_edit_moves_to_word_boundary() {
        let mut segments = vec![
            seg(Tag::Equal, "The c"),
            seg(Tag::Insert, "ow and the c"),
            seg(Tag::Equal, "at."),
        ];
        shift_to_boundaries(&mut segments);
        assert_eq!(
            segments,
            vec![
                seg(Tag::Equal, "The "),
                seg(Tag::Insert, "cow and the "),
                seg(Tag::Equal, "cat."),
            ]
        );
    }

    #[test]
    fn edit_reaching_text_edge_absorbs_equality() {
        let mut segments = vec![
            seg(Tag::Equal, "a"),
            seg(Tag::Delete, "a"),
            seg(Tag::Equal, "ax"),
        ];
        shift_to_boundaries(&mut segments);
        assert_eq!(segments, vec![seg(Tag::Delete, "a"), seg(Tag::Equal, "aax")]);
    }

    #[test]
    fn slides_through_long_repeated_run() {
        let run = "a".repeat(20_000);
        let mut segments = vec![
            seg(Tag::Equal, &format!("x{}", &run[..10_000])),
            seg(Tag::Delete, "aa"),
            seg(Tag::Equal, &format!("{}y", &run[..10_000])),
        ];
        shift_to_boundaries(&mut segments);
        assert_eq!(
            segments,
            vec![
                seg(Tag::Equal, &format!("x{run}")),
                seg(Tag::Delete, "aa"),
                seg(Tag::Equal, "y"),
            ]
        );
    }

    #[test]
    fn boundary_scores() {
        let c = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(boundary_score(&c(""), &c("x")), 6);
        assert_eq!(boundary_score(&c("a\n\n"), &c("b")), 5);
        assert_eq!(boundary_score(&c("a\n"), &c("b")), 4);
        assert_eq!(boundary_score(&c("end."), &c(" next")), 3);
        assert_eq!(boundary_score(&c("word"), &c(" next")), 2);
        assert_eq!(boundary_score(&c("a,"), &c("b")), 1);
        assert_eq!(boundary_score(&c("ab"), &c("cd")), 0);
    }
}
