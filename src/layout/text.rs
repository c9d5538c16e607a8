use std::collections::VecDeque;

use crate::renderer::TextMeasure;
use crate::units::Pt;
use crate::PDFError;

/// A contiguous piece of text sharing one font
#[derive(Clone, PartialEq, Debug)]
pub struct FormattedRun<F> {
    pub text: String,
    pub font: F,
}

impl<F> FormattedRun<F> {
    pub fn new<S: Into<String>>(text: S, font: F) -> FormattedRun<F> {
        FormattedRun {
            text: text.into(),
            font,
        }
    }
}

/// One visual row of text, stored as the words that were placed on it. Words are
/// separated by a single space set in the font of the preceding word.
#[derive(Clone, PartialEq, Debug)]
pub struct Line<F> {
    words: Vec<FormattedRun<F>>,
}

impl<F: Clone + PartialEq> Line<F> {
    /// A line holding a single empty run; it has no width but still has the height of `font`
    pub fn blank(font: F) -> Line<F> {
        Line {
            words: vec![FormattedRun::new("", font)],
        }
    }

    pub fn words(&self) -> &[FormattedRun<F>] {
        &self.words
    }

    pub fn is_blank(&self) -> bool {
        self.words.iter().all(|word| word.text.is_empty())
    }

    /// The plain text of the line, words joined by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The runs to hand to a renderer: neighbouring words sharing a font are merged,
    /// and the separating space is kept at the end of the run that precedes it.
    pub fn runs(&self) -> Vec<FormattedRun<F>> {
        let mut runs: Vec<FormattedRun<F>> = Vec::with_capacity(self.words.len());
        for word in self.words.iter() {
            match runs.last_mut() {
                Some(last) if last.font == word.font => {
                    last.text.push(' ');
                    last.text.push_str(&word.text);
                }
                Some(last) => {
                    last.text.push(' ');
                    runs.push(word.clone());
                }
                None => runs.push(word.clone()),
            }
        }
        runs
    }

    /// Measured width of the words plus the spaces between them
    pub fn width<M>(&self, measure: &M) -> Result<Pt, PDFError>
    where
        M: TextMeasure<Font = F> + ?Sized,
    {
        let mut width = Pt(0.0);
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                width += measure.text_width(" ", &self.words[i - 1].font)?;
            }
            width += measure.text_width(&word.text, &word.font)?;
        }
        Ok(width)
    }

    /// The tallest line height over the fonts used on this line
    pub fn height<M>(&self, measure: &M) -> Result<Pt, PDFError>
    where
        M: TextMeasure<Font = F> + ?Sized,
    {
        let mut height = Pt(0.0);
        for word in self.words.iter() {
            height = height.max(measure.line_height(&word.font)?);
        }
        Ok(height)
    }
}

/// Breaks formatted runs into lines no wider than `max_width`.
///
/// Runs are split on single spaces into words that keep their run's font; repeated
/// spaces become empty words, so the original spacing is kept. Words are added to the
/// current line for as long as the line stays strictly narrower than `max_width`. A word that cannot fit even on an empty line is cut character by
/// character: the longest prefix that fits becomes its own line and the rest is fed
/// back in as a new word, so a very long token spans as many lines as it needs.
///
/// Empty text still produces exactly one blank line, so callers can always advance by
/// at least one line height.
///
/// ```
/// use pdf_flow::layout::{wrap, FormattedRun};
/// use pdf_flow::recording::{MonoFont, RecordingRenderer};
/// use pdf_flow::Pt;
///
/// let font = MonoFont::new(Pt(10.0), Pt(12.0));
/// let renderer = RecordingRenderer::new(font);
/// let lines = wrap(&renderer, &[FormattedRun::new("the quick brown fox", font)], Pt(100.0))
///     .expect("can wrap");
/// let text: Vec<String> = lines.iter().map(|line| line.text()).collect();
/// assert_eq!(text, vec!["the quick", "brown fox"]);
/// ```
pub fn wrap<M>(
    measure: &M,
    runs: &[FormattedRun<M::Font>],
    max_width: Pt,
) -> Result<Vec<Line<M::Font>>, PDFError>
where
    M: TextMeasure + ?Sized,
{
    if !(max_width > Pt(0.0)) {
        return Err(PDFError::layout(
            "wrap",
            format!("maximum line width must be positive, got {max_width}"),
        ));
    }

    if runs.iter().all(|run| run.text.is_empty()) {
        let font = runs
            .first()
            .map(|run| run.font.clone())
            .unwrap_or_else(|| measure.default_font());
        return Ok(vec![Line::blank(font)]);
    }

    // runs of spaces become empty words so the spacing survives
    let mut words: VecDeque<FormattedRun<M::Font>> = runs
        .iter()
        .filter(|run| !run.text.is_empty())
        .flat_map(|run| {
            run.text
                .split(' ')
                .map(move |word| FormattedRun::new(word, run.font.clone()))
        })
        .collect();

    let mut lines: Vec<Line<M::Font>> = Vec::new();
    let mut line: Vec<FormattedRun<M::Font>> = Vec::new();
    let mut line_width = Pt(0.0);

    while let Some(word) = words.pop_front() {
        let word_width = measure.text_width(&word.text, &word.font)?;
        let candidate = match line.last() {
            Some(previous) => line_width + measure.text_width(" ", &previous.font)? + word_width,
            None => word_width,
        };

        if candidate < max_width {
            line.push(word);
            line_width = candidate;
        } else if !line.is_empty() {
            // retry the word at the start of a fresh line
            lines.push(Line {
                words: std::mem::take(&mut line),
            });
            line_width = Pt(0.0);
            words.push_front(word);
        } else {
            let (head, tail) = split_word(measure, word, max_width)?;
            lines.push(Line { words: vec![head] });
            if let Some(tail) = tail {
                words.push_front(tail);
            }
        }
    }

    if !line.is_empty() {
        lines.push(Line { words: line });
    }

    tracing::trace!(lines = lines.len(), %max_width, "wrapped text");
    Ok(lines)
}

/// Cut `word` after the longest prefix narrower than `max_width`. At least one
/// character is always kept in the head.
fn split_word<M>(
    measure: &M,
    word: FormattedRun<M::Font>,
    max_width: Pt,
) -> Result<(FormattedRun<M::Font>, Option<FormattedRun<M::Font>>), PDFError>
where
    M: TextMeasure + ?Sized,
{
    let mut split = 0;
    for (index, ch) in word.text.char_indices() {
        let end = index + ch.len_utf8();
        if measure.text_width(&word.text[..end], &word.font)? < max_width {
            split = end;
        } else {
            break;
        }
    }

    if split == 0 {
        split = word.text.chars().next().map(char::len_utf8).unwrap_or_default();
    }

    let FormattedRun { text, font } = word;
    let (head, tail) = text.split_at(split);
    let tail = if tail.is_empty() {
        None
    } else {
        Some(FormattedRun::new(tail, font.clone()))
    };
    Ok((FormattedRun::new(head, font), tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{MonoFont, RecordingRenderer};
    use proptest::prelude::*;

    const FONT: MonoFont = MonoFont::new(Pt(10.0), Pt(12.0));
    const BOLD: MonoFont = MonoFont::new(Pt(20.0), Pt(18.0));

    fn texts(lines: &[Line<MonoFont>]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn empty_input_is_one_blank_line() {
        let renderer = RecordingRenderer::new(FONT);

        let lines = wrap(&renderer, &[], Pt(50.0)).expect("can wrap");
        assert_eq!(lines, vec![Line::blank(FONT)]);

        let lines = wrap(&renderer, &[FormattedRun::new("", BOLD)], Pt(50.0)).expect("can wrap");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words(), &[FormattedRun::new("", BOLD)]);
        assert!(lines[0].is_blank());
        assert_eq!(lines[0].height(&renderer).expect("can measure"), Pt(18.0));
    }

    #[test]
    fn spaces_only_line_draws_nothing() {
        let renderer = RecordingRenderer::new(FONT);
        let lines = wrap(&renderer, &[FormattedRun::new("   ", FONT)], Pt(50.0))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["   "]);
        assert!(lines[0].is_blank());
    }

    #[test]
    fn repeated_spaces_are_kept() {
        let renderer = RecordingRenderer::new(FONT);
        let lines = wrap(&renderer, &[FormattedRun::new("a  b", FONT)], Pt(500.0))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["a  b"]);
        assert_eq!(lines[0].width(&renderer).expect("can measure"), Pt(40.0));
        assert_eq!(lines[0].runs(), vec![FormattedRun::new("a  b", FONT)]);
    }

    #[test]
    fn exact_fit_moves_to_next_line() {
        let renderer = RecordingRenderer::new(FONT);
        // "ab cd" is exactly 50pt wide
        let lines = wrap(&renderer, &[FormattedRun::new("ab cd", FONT)], Pt(50.0))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["ab", "cd"]);

        let lines = wrap(&renderer, &[FormattedRun::new("ab cd", FONT)], Pt(50.5))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["ab cd"]);
    }

    #[test]
    fn long_word_is_split_and_remainder_rejoins_flow() {
        let renderer = RecordingRenderer::new(FONT);
        let lines = wrap(
            &renderer,
            &[FormattedRun::new("abcdefghij xy", FONT)],
            Pt(45.0),
        )
        .expect("can wrap");
        assert_eq!(texts(&lines), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn remainder_can_share_a_line() {
        let renderer = RecordingRenderer::new(FONT);
        let lines = wrap(&renderer, &[FormattedRun::new("abcdef g", FONT)], Pt(45.0))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["abcd", "ef g"]);
    }

    #[test]
    fn single_character_wider_than_line_still_progresses() {
        let renderer = RecordingRenderer::new(FONT);
        let lines = wrap(&renderer, &[FormattedRun::new("abc", FONT)], Pt(5.0))
            .expect("can wrap");
        assert_eq!(texts(&lines), vec!["a", "b", "c"]);
    }

    #[test]
    fn mixed_fonts_keep_word_formatting() {
        let renderer = RecordingRenderer::new(FONT);
        let runs = vec![
            FormattedRun::new("plain words", FONT),
            FormattedRun::new("BOLD", BOLD),
            FormattedRun::new("tail", FONT),
        ];
        let lines = wrap(&renderer, &runs, Pt(300.0)).expect("can wrap");
        assert_eq!(lines.len(), 1);

        let line = &lines[0];
        assert_eq!(line.words().len(), 4);
        assert_eq!(line.words()[2], FormattedRun::new("BOLD", BOLD));
        // "plain words " in the plain font, "BOLD " in bold, then "tail"
        assert_eq!(line.width(&renderer).expect("can measure"), Pt(120.0 + 100.0 + 40.0));
        assert_eq!(line.height(&renderer).expect("can measure"), Pt(18.0));
        assert_eq!(
            line.runs(),
            vec![
                FormattedRun::new("plain words ", FONT),
                FormattedRun::new("BOLD ", BOLD),
                FormattedRun::new("tail", FONT),
            ]
        );
    }

    #[test]
    fn rejects_non_positive_width() {
        let renderer = RecordingRenderer::new(FONT);
        let err = wrap(&renderer, &[FormattedRun::new("a", FONT)], Pt(0.0))
            .expect_err("zero width cannot hold text");
        assert!(matches!(err, PDFError::Layout { operation: "wrap", .. }));
    }

    proptest! {
        #[test]
        fn fitting_text_is_a_single_line(text in "[a-z]{1,8}( {1,3}[a-z]{1,8}){0,4}") {
            let renderer = RecordingRenderer::new(FONT);
            let width = Pt(text.chars().count() as f32 * 10.0 + 1.0);
            let lines = wrap(&renderer, &[FormattedRun::new(text.clone(), FONT)], width).unwrap();
            prop_assert_eq!(texts(&lines), vec![text]);
        }

        #[test]
        fn rejoining_lines_restores_text(text in "[a-z]{1,6}( [a-z]{1,6}){0,30}", max in 61.0f32..300.0) {
            let renderer = RecordingRenderer::new(FONT);
            let lines = wrap(&renderer, &[FormattedRun::new(text.clone(), FONT)], Pt(max)).unwrap();
            prop_assert_eq!(texts(&lines).join(" "), text);
            for line in lines.iter() {
                prop_assert!(line.width(&renderer).unwrap() < Pt(max));
            }
        }

        #[test]
        fn long_words_split_into_narrow_prefixes(word in "[a-z]{6,40}", max in 11.0f32..55.0) {
            let renderer = RecordingRenderer::new(FONT);
            let lines = wrap(&renderer, &[FormattedRun::new(word.clone(), FONT)], Pt(max)).unwrap();
            prop_assert!(lines.len() >= 2);
            for line in lines.iter() {
                prop_assert!(line.width(&renderer).unwrap() < Pt(max));
            }
            prop_assert_eq!(texts(&lines).concat(), word);
        }
    }
}
