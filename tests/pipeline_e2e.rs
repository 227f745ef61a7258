// tests/pipeline_e2e.rs
use oab_questions::columns::SourceFormat;
use oab_questions::config::options::NormalizeOptions;
use oab_questions::normalize::normalize;
use oab_questions::progress::{CountingProgress, NullProgress};
use oab_questions::source::{Delim, csv};
use oab_questions::validate::ValidationMode;
use oab_questions::ChallengeType;

const GROUPED_HEAD: &str = "ObjectQuestionId,QuestionStem,Letter,Description,Correct,Name\n";

fn grouped(body: &str) -> oab_questions::source::Sheet {
    csv::read_str(&format!("{GROUPED_HEAD}{body}"), Delim::Csv)
}

#[test]
fn four_rows_one_question() {
    let sheet = grouped(
        "Q1,O que é X?,A,Opção Um,true,\n\
         Q1,O que é X?,B,Opção Dois,false,\n\
         Q1,O que é X?,C,Opção Três,false,\n\
         Q1,O que é X?,D,Opção Quatro,false,\n",
    );
    let mut progress = CountingProgress::default();
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut progress).unwrap();

    assert_eq!(out.records.len(), 1);
    let q = &out.records[0];
    assert_eq!(q.id, "Q1");
    assert_eq!(q.text, "O que é X?");
    assert_eq!(q.options, vec!["Opção Um", "Opção Dois", "Opção Três", "Opção Quatro"]);
    assert_eq!(q.correct_answer_index, 0);
    assert_eq!(q.difficulty, 2);
    assert_eq!(q.category, "Direito Geral");
    assert_eq!(q.challenge_type, ChallengeType::Oab1Fase);
    assert_eq!(q.explanation, "Questão Q1");
    assert!(out.report.defaulted_answers.is_empty());

    assert_eq!(progress.total, 4);
    assert_eq!(progress.done, 4);
    assert!(progress.finished);
}

#[test]
fn interleaved_keys_keep_first_row_fields() {
    let sheet = grouped(
        "7,<p>Primeiro enunciado</p>,A,Alternativa um,0,Direito Civil\n\
         8,Outro enunciado,A,Alternativa um,1,Direito Penal\n\
         7,Enunciado diferente,B,Alternativa dois,1,Direito Penal\n\
         8,,B,Alternativa dois,0,\n\
         7,,C,Alternativa três,0,\n\
         8,,C,Alternativa três,0,\n\
         7,,D,Alternativa quatro,0,\n\
         8,,D,Alternativa quatro,0,\n",
    );
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(out.records.len(), 2);

    let a = &out.records[0];
    assert_eq!(a.id, "7");
    assert_eq!(a.text, "Primeiro enunciado");
    assert_eq!(a.category, "Direito Civil");
    assert_eq!(a.correct_answer_index, 1);
    assert_eq!(a.explanation, "Questão extraída do curso: Direito Civil");

    let b = &out.records[1];
    assert_eq!(b.id, "8");
    assert_eq!(b.category, "Direito Penal");
    assert_eq!(b.correct_answer_index, 0);
}

#[test]
fn strict_records_are_complete() {
    let sheet = grouped(
        "1,Completa,A,Primeira,1,\n1,Completa,B,Segunda,0,\n1,Completa,C,Terceira,0,\n1,Completa,D,Quarta opção,0,\n\
         2,Três opções,A,Primeira,1,\n2,Três opções,B,Segunda,0,\n2,Três opções,C,Terceira,0,\n\
         3,Buraco,A,Primeira,1,\n3,Buraco,B,Segunda,0,\n3,Buraco,D,Quarta opção,0,\n\
         4,Com ruído,A,Primeira,0,\n4,Com ruído,B,B),0,\n4,Com ruído,C,Terceira,0,\n4,Com ruído,D,Quarta opção,0,\n",
    );
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(out.report.mode, Some(ValidationMode::Strict));
    assert_eq!(out.report.drafts, 4);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].id, "1");
    for r in &out.records {
        assert_eq!(r.options.len(), 4);
        assert!(r.options.iter().all(|o| !o.trim().is_empty()));
        assert!(r.correct_answer_index < r.options.len());
    }
    // "B)" is noise and skipped with its line
    assert_eq!(out.report.skipped.len(), 1);
    assert_eq!(out.report.skipped[0].line, 13);
    assert_eq!(out.report.rejected.len(), 3);
}

#[test]
fn earlier_course_rule_wins() {
    let sheet = grouped(
        "1,Pergunta,A,Primeira,1,Direito Civil e Penal\n1,Pergunta,B,Segunda,0,\n1,Pergunta,C,Terceira,0,\n1,Pergunta,D,Quarta,0,\n",
    );
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(out.records[0].category, "Direito Civil");
}

#[test]
fn text_rules_apply_without_course() {
    let sheet = grouped(
        "1,O promotor ofereceu denúncia,A,Primeira,1,\n1,x,B,Segunda,0,\n1,x,C,Terceira,0,\n1,x,D,Quarta opção,0,\n",
    );
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(out.records[0].challenge_type, ChallengeType::ConcursosMpsp);
    assert_eq!(out.records[0].category, "Direito Geral");
}

#[test]
fn flat_sheet_end_to_end() {
    let text = "QUESTÃO\tA)\tB)\tC)\tD)\tGABARITO\tDISCIPLINA\tTIPO\n\
                Qual a capital?\tRio\tSão Paulo\tBrasília\tSalvador\tC\tGeografia jurídica\tENAM\n\
                Sem gabarito?\tum\tdois\ttrês\tquatro\t\tProcesso Penal\t\n";
    let sheet = csv::read_str(text, Delim::Tsv);
    let out = normalize(&sheet, &NormalizeOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(out.report.format, Some(SourceFormat::Flat));
    assert_eq!(out.records.len(), 2);

    let a = &out.records[0];
    assert_eq!(a.id, "Q0001");
    assert_eq!(a.correct_answer_index, 2);
    assert_eq!(a.category, "Geografia jurídica");
    assert_eq!(a.challenge_type, ChallengeType::ConcursosEnam);

    let b = &out.records[1];
    assert_eq!(b.id, "Q0002");
    assert_eq!(b.category, "Direito Penal");
    assert_eq!(out.report.defaulted_answers, vec!["Q0002".to_string()]);
}

#[test]
fn positional_sheet_is_lenient() {
    let text = "texto,op1,op2,op3,op4,curso\n\
                Primeira pergunta,*Sim,Não,,,Defensoria Pública SP\n\
                Segunda pergunta,Só uma,,,,\n";
    let sheet = csv::read_str(text, Delim::Csv);
    let opts = NormalizeOptions { format: SourceFormat::Positional, ..Default::default() };
    let out = normalize(&sheet, &opts, &mut NullProgress).unwrap();
    assert_eq!(out.report.mode, Some(ValidationMode::Lenient));
    assert_eq!(out.records.len(), 1);
    let q = &out.records[0];
    assert_eq!(q.options, vec!["Sim", "Não"]);
    assert_eq!(q.correct_answer_index, 0);
    assert_eq!(q.challenge_type, ChallengeType::ConcursosDefensoria);
    assert_eq!(q.category, "Defensoria Pública SP");
    assert!(out.report.defaulted_answers.is_empty());
}
