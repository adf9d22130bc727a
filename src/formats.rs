use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Read, Write};
use tracing::warn;

use crate::backfill::BackfillSummary;
use crate::config::OutputFormat;
use crate::difficulty::{PhraseInput, ScoreBreakdown, ScoredPhrase};
use crate::error::Result;

/// Shape of batch input
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// One phrase per line, language detected
    #[default]
    Lines,
    /// One `{"text": .., "language": ..}` object per line
    Jsonl,
    /// `text,language` with a header row
    Csv,
}

/// Parse batch items. Blank lines are skipped for `lines` and `jsonl`.
///
/// Only I/O failures abort the read. A row that can't be understood becomes an
/// empty item in its place, and a field of the wrong type is treated as absent.
pub fn read_phrases<R: Read>(reader: R, format: InputFormat) -> Result<Vec<PhraseInput>> {
    match format {
        InputFormat::Lines => std::io::BufReader::new(reader)
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|line| -> Result<PhraseInput> { Ok(PhraseInput::new(line?, None)) })
            .collect(),
        InputFormat::Jsonl => std::io::BufReader::new(reader)
            .lines()
            .enumerate()
            .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|(index, line)| -> Result<PhraseInput> {
                let line = line?;
                match serde_json::from_str::<Value>(&line) {
                    Ok(value) => Ok(phrase_from_json(&value)),
                    Err(e) => {
                        warn!(line = index + 1, error = %e, "unreadable batch item");
                        Ok(PhraseInput::default())
                    }
                }
            })
            .collect(),
        InputFormat::Csv => csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader)
            .deserialize::<PhraseInput>()
            .enumerate()
            .map(|(index, row)| -> Result<PhraseInput> {
                match row {
                    Ok(item) => Ok(item),
                    Err(e) if e.is_io_error() => Err(e.into()),
                    Err(e) => {
                        warn!(row = index + 1, error = %e, "unreadable batch item");
                        Ok(PhraseInput::default())
                    }
                }
            })
            .collect(),
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Pick the known fields out of one JSON row, ignoring anything not a string
fn phrase_from_json(value: &Value) -> PhraseInput {
    PhraseInput {
        text: string_field(value, &["text"]),
        language: string_field(value, &["language", "lang", "language_tag"]),
    }
}

/// Render a list of serializable rows
fn write_rows<W: Write, T: Serialize>(
    out: &mut W,
    rows: &[T],
    format: OutputFormat,
    text_line: impl Fn(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{}", text_line(row))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn write_breakdown<W: Write>(out: &mut W, breakdown: &ScoreBreakdown, explain: bool, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Text && !explain {
        writeln!(out, "{} ({})", breakdown.score, breakdown.label)?;
        return Ok(());
    }
    write_rows(out, std::slice::from_ref(breakdown), format, |b| {
        format!(
            "score:      {} ({})\nlanguage:   {} ({})\nnormalized: {} ({} letters)\nrarity:     {:.2}\nstructure:  {:.2}\nraw:        {:.2}",
            b.score,
            b.label,
            b.language,
            b.language_source,
            b.normalized,
            b.letters,
            b.rarity.value(),
            b.structure.value(),
            b.raw,
        )
    })
}

pub fn write_scored<W: Write>(out: &mut W, results: &[ScoredPhrase], format: OutputFormat) -> Result<()> {
    write_rows(out, results, format, |r| {
        format!(
            "{:>3}  {:<9}  {:<7}  {}",
            r.score.value(),
            r.label.to_string(),
            r.language.code(),
            r.text.as_deref().unwrap_or("")
        )
    })
}

pub fn write_summary<W: Write>(out: &mut W, summary: &BackfillSummary, format: OutputFormat) -> Result<()> {
    write_rows(out, std::slice::from_ref(summary), format, |s| {
        let remaining = s
            .remaining
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "scanned {}, scored {}, failed {}, skipped {}, remaining {} ({} ms)",
            s.scanned,
            s.scored,
            s.failed,
            s.skipped,
            remaining,
            (s.finished_at - s.started_at).num_milliseconds()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{score_batch, score_with_breakdown};
    use crate::language::Language;

    #[test]
    fn test_read_lines_skips_blanks() {
        let items = read_phrases("hello\n\n  \nhej på dig\n".as_bytes(), InputFormat::Lines).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text.as_deref(), Some("hej på dig"));
        assert_eq!(items[1].language, None);
    }

    #[test]
    fn test_read_jsonl() {
        let input = "{\"text\": \"hello\", \"language\": \"en\"}\n{\"text\": \"hej\", \"lang\": \"sv\"}\n{}\n";
        let items = read_phrases(input.as_bytes(), InputFormat::Jsonl).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].language.as_deref(), Some("sv"));
        assert_eq!(items[2], PhraseInput::default());
    }

    #[test]
    fn test_read_jsonl_wrong_types_become_absent() {
        let input = "{\"text\":\"hello\",\"language\":\"en\"}\n{\"text\":\"hej\",\"language\":5}\n{\"text\":[1],\"lang\":null}\n{\"text\":\"world\",\"language\":\"en\"}\n";
        let items = read_phrases(input.as_bytes(), InputFormat::Jsonl).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0], PhraseInput::new("hello", Some("en")));
        assert_eq!(items[1], PhraseInput::new("hej", None));
        assert_eq!(items[2], PhraseInput::default());
        assert_eq!(items[3], PhraseInput::new("world", Some("en")));
    }

    #[test]
    fn test_read_jsonl_keeps_place_of_unreadable_lines() {
        let input = "{\"text\":\"hello\"}\nnot json\n42\n{\"text\":\"world\"}\n";
        let items = read_phrases(input.as_bytes(), InputFormat::Jsonl).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[1], PhraseInput::default());
        assert_eq!(items[2], PhraseInput::default());
        assert_eq!(items[3].text.as_deref(), Some("world"));

        let results = score_batch(&items);
        assert_eq!(results[1].score, crate::DifficultyScore::MIN);
        assert!(results[3].score > crate::DifficultyScore::MIN);
    }

    #[test]
    fn test_read_fails_on_io_errors() {
        let invalid_utf8: &[u8] = &[b'h', 0xff, 0xfe, b'\n'];
        assert!(read_phrases(invalid_utf8, InputFormat::Lines).is_err());
        assert!(read_phrases(invalid_utf8, InputFormat::Jsonl).is_err());
    }

    #[test]
    fn test_read_csv_numeric_tag_is_just_unknown() {
        let input = "text,language\nhello,en\nhej,5\nworld,en\n";
        let items = read_phrases(input.as_bytes(), InputFormat::Csv).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[1].language.as_deref(), Some("5"));
        let results = score_batch(&items);
        assert_eq!(results[1].score, crate::score(Some("hej"), None));
    }

    #[test]
    fn test_read_csv() {
        let input = "text,language\nhello,en\nhej,\n";
        let items = read_phrases(input.as_bytes(), InputFormat::Csv).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].language.as_deref(), Some("en"));
        assert_eq!(items[1].language, None);
    }

    #[test]
    fn test_write_scored_text() {
        let results = score_batch(&[PhraseInput::new("hej", Some("sv"))]);
        let mut out = Vec::new();
        write_scored(&mut out, &results, OutputFormat::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("sv"));
        assert!(text.trim_end().ends_with("hej"));
    }

    #[test]
    fn test_write_scored_json_round_trips() {
        let results = score_batch(&[PhraseInput::new("hello", None), PhraseInput::default()]);
        let mut out = Vec::new();
        write_scored(&mut out, &results, OutputFormat::Json).unwrap();

        let parsed: Vec<ScoredPhrase> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, results);
        assert_eq!(parsed[0].language, Language::English);
    }

    #[test]
    fn test_write_scored_csv_has_header() {
        let results = score_batch(&[PhraseInput::new("quiz", Some("en"))]);
        let mut out = Vec::new();
        write_scored(&mut out, &results, OutputFormat::Csv).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("text,language,score,label"));
        assert!(lines.next().unwrap().starts_with("quiz,english,"));
    }

    #[test]
    fn test_write_breakdown_short_and_explained() {
        let breakdown = score_with_breakdown(Some("jazz"), None);

        let mut short = Vec::new();
        write_breakdown(&mut short, &breakdown, false, OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(short).unwrap(),
            format!("{} ({})\n", breakdown.score, breakdown.label)
        );

        let mut long = Vec::new();
        write_breakdown(&mut long, &breakdown, true, OutputFormat::Text).unwrap();
        let long = String::from_utf8(long).unwrap();
        assert!(long.contains("normalized: jazz (4 letters)"));
        assert!(long.contains("english (detected)"));
    }
}
