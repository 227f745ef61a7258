// benches/normalize.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use oab_questions::config::options::NormalizeOptions;
use oab_questions::core::clean_text;
use oab_questions::normalize::normalize;
use oab_questions::progress::NullProgress;
use oab_questions::source::{Delim, csv};

/// Synthetic grouped sheet: `n` questions x 4 option rows, with the HTML
/// noise real LMS exports carry.
fn synthetic_sheet(n: usize) -> String {
    let mut text = String::from("ObjectQuestionId,QuestionStem,Letter,Description,Correct,Name\n");
    let courses = ["Direito Civil", "Direito Penal", "Ética Profissional", "Concurso MPSP"];
    for q in 0..n {
        for (i, letter) in ["A", "B", "C", "D"].iter().enumerate() {
            text.push_str(&format!(
                "{q},\"<p>Enunciado&nbsp;da quest&atilde;o {q} sobre o <b>tema</b></p>\",{letter},\
                 <span>Alternativa {letter} da quest&atilde;o {q}</span>,{},{}\n",
                u8::from(i == q % 4),
                courses[q % courses.len()],
            ));
        }
    }
    text
}

fn bench_normalize(c: &mut Criterion) {
    let raw = synthetic_sheet(2_000);
    let sheet = csv::read_str(&raw, Delim::Csv);
    let opts = NormalizeOptions::default();

    c.bench_function("csv_parse_8k_rows", |b| {
        b.iter(|| {
            let s = csv::read_str(black_box(&raw), Delim::Csv);
            black_box(s.len())
        })
    });

    c.bench_function("normalize_grouped_2k", |b| {
        b.iter(|| {
            let out = normalize(black_box(&sheet), &opts, &mut NullProgress).unwrap();
            black_box(out.records.len())
        })
    });

    c.bench_function("clean_text_markup", |b| {
        let s = "<p>Sobre o &quot;habeas corpus&quot;,&nbsp;&eacute; <b>correto</b> afirmar:</p>\n\t";
        b.iter(|| black_box(clean_text(black_box(s))))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
