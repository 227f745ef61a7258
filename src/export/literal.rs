// src/export/literal.rs
//
// TypeScript source literal:
//
//   // 2 questões
//   export const questionsData = [
//     {
//       id: "Q1",
//       text: "O que é X?",
//       options: ["Opção Um", "Opção Dois"],
//       correctAnswerIndex: 0,
//       ...
//     }
//   ];
//
// Typed mode adds the `Question` import and annotation and leaves `id` out,
// the consumer assigns ids on insert.

use std::io::{self, Write};

use crate::config::consts::{TYPED_ANNOTATION, TYPED_IMPORT};
use crate::config::options::LiteralOptions;
use crate::core::sanitize::truncate_chars;
use crate::question::QuestionRecord;

/// Escape for a double-quoted JS string.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn quoted(s: &str) -> String {
    join!("\"", &escape(s), "\"")
}

fn write_record<W: Write>(w: &mut W, q: &QuestionRecord, opts: &LiteralOptions) -> io::Result<()> {
    let text = match opts.truncate_text {
        Some(max) => truncate_chars(&q.text, max),
        None => s!(&q.text),
    };
    let options: Vec<String> = q.options.iter().map(|o| quoted(o)).collect();

    writeln!(w, "  {{")?;
    if !opts.typed {
        writeln!(w, "    id: {},", quoted(&q.id))?;
    }
    writeln!(w, "    text: {},", quoted(&text))?;
    writeln!(w, "    options: [{}],", options.join(", "))?;
    writeln!(w, "    correctAnswerIndex: {},", q.correct_answer_index)?;
    writeln!(w, "    difficulty: {},", q.difficulty)?;
    writeln!(w, "    category: {},", quoted(&q.category))?;
    writeln!(w, "    challengeType: {},", quoted(q.challenge_type.label()))?;
    writeln!(w, "    explanation: {}", quoted(&q.explanation))?;
    write!(w, "  }}")
}

/// Stream the whole literal to any writer.
pub fn write_literal<W: Write>(mut w: W, records: &[QuestionRecord], opts: &LiteralOptions) -> io::Result<()> {
    if opts.header_comment {
        writeln!(w, "// {} questões", records.len())?;
    }
    if opts.typed {
        writeln!(w, "{TYPED_IMPORT}")?;
        writeln!(w)?;
        writeln!(w, "export const {}: {} = [", opts.const_name, TYPED_ANNOTATION)?;
    } else {
        writeln!(w, "export const {} = [", opts.const_name)?;
    }

    let last = records.len().saturating_sub(1);
    for (i, q) in records.iter().enumerate() {
        write_record(&mut w, q, opts)?;
        // no trailing comma on the last element
        if i < last {
            writeln!(w, ",")?;
        } else {
            writeln!(w)?;
        }
    }
    writeln!(w, "];")
}

pub fn to_literal_string(records: &[QuestionRecord], opts: &LiteralOptions) -> io::Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_literal(&mut buf, records, opts)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
