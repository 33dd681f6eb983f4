use pretty_assertions::assert_eq;
use rand::RngCore;
use redline::detectors::DetectorOutput;
use redline::types::Finding;
use redline::{
    Analysis, AnalysisOptions, CitationForm, CitationStyle, Detector, DocumentType, EngineError,
    FixMode, Issue, IssueKind, KindSelector, Position, ScoringMode, Session, Severity,
};

const ESSAY: &str = "Teh committee could of met on Tuesday, but they was late due to the fact that \
the the roads were closed. We recieve many letters about this.\n\n\
The proposal was written by the board. It is neccessary to accomodate every member in order to succeed.";

fn issues_of(analysis: &Analysis, kind: IssueKind) -> Vec<&Issue> {
    analysis.issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn short_text_is_rejected() {
    let mut session = Session::with_seed(1);
    let err = session
        .analyze("short text", &AnalysisOptions::default())
        .unwrap_err();
    match err {
        EngineError::InputTooShort { length, minimum } => {
            assert_eq!((length, minimum), (10, 100));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(session.analysis().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn length_boundary_counts_trimmed_characters() {
    let mut session = Session::with_seed(1);
    let options = AnalysisOptions::default();

    let just_short = format!("   {}   ", "a".repeat(99));
    assert!(matches!(
        session.analyze(&just_short, &options),
        Err(EngineError::InputTooShort { length: 99, .. })
    ));

    let padded = format!("{}word", " ".repeat(100));
    assert!(session.analyze(&padded, &options).is_err());

    let at_boundary = format!("\n{}\n", "word ".repeat(20).trim_end().to_string() + "s");
    assert_eq!(at_boundary.trim().chars().count(), 100);
    assert!(session.analyze(&at_boundary, &options).is_ok());
}

#[test]
fn misspelling_gets_exactly_one_correction() {
    let text = "The hotel could not accomodate our whole group that weekend, so we found \
                another place to stay near the station and walked over in the morning.";
    let options = AnalysisOptions {
        check_spelling: true,
        ..AnalysisOptions::none()
    };
    let analysis = Session::with_seed(2).analyze(text, &options).unwrap();

    let spelling = issues_of(&analysis, IssueKind::Spelling);
    assert_eq!(spelling.len(), 1);
    assert_eq!(spelling[0].suggestion, "accommodate");
    assert_eq!(spelling[0].matched_text, "accomodate");
    assert_eq!(spelling[0].severity, Severity::Low);
}

#[test]
fn academic_text_with_citations() {
    let text = "Barack Obama (2008). The Audacity of Hope is widely cited in political writing. \
                (Smith, 2010) argues something else entirely about the same period.";
    let options = AnalysisOptions::default().with_document_type(DocumentType::Academic);
    let analysis = Session::with_seed(3).analyze(text, &options).unwrap();

    let forms: Vec<CitationForm> = analysis.citations.iter().map(|c| c.form).collect();
    assert!(forms.contains(&CitationForm::Narrative));
    assert!(forms.contains(&CitationForm::InText));
    assert!(issues_of(&analysis, IssueKind::Citation)
        .iter()
        .all(|i| i.severity != Severity::High));
}

#[test]
fn academic_text_without_citations_gets_one_document_issue() {
    let text = "Many scholars have examined this question over the years and reached \
                different conclusions.\n\nThe evidence on either side remains thin and contested.";
    let options = AnalysisOptions::default().with_document_type(DocumentType::Academic);
    let analysis = Session::with_seed(4).analyze(text, &options).unwrap();

    let citation = issues_of(&analysis, IssueKind::Citation);
    assert_eq!(citation.len(), 1);
    assert_eq!(citation[0].severity, Severity::High);
    assert!(analysis.citations.is_empty());
}

#[test]
fn citation_checks_only_for_academic_documents() {
    let text = "Many scholars have examined this question over the years and reached \
                different conclusions without agreeing on much.";
    let analysis = Session::with_seed(4)
        .analyze(text, &AnalysisOptions::default())
        .unwrap();
    assert!(issues_of(&analysis, IssueKind::Citation).is_empty());
}

#[test]
fn every_issue_points_at_its_matched_text() {
    let mut session = Session::with_seed(5);
    let options = AnalysisOptions {
        check_plagiarism: true,
        ..AnalysisOptions::default().with_document_type(DocumentType::Academic)
    };
    let analysis = session.analyze(ESSAY, &options).unwrap();
    let document = session.document().unwrap();

    assert!(analysis.issues.len() >= 10);
    for issue in &analysis.issues {
        let paragraph = document.paragraph(issue.position.paragraph_index).unwrap();
        assert_eq!(
            &paragraph[issue.position.start_offset..issue.position.end_offset],
            issue.matched_text,
            "issue {}",
            issue.id
        );
        assert!(!issue.is_stale(document));
    }
}

#[test]
fn ids_are_unique() {
    let analysis = Session::with_seed(6)
        .analyze(ESSAY, &AnalysisOptions::default())
        .unwrap();
    let mut ids: Vec<&str> = analysis.issues.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), analysis.issues.len());
}

#[test]
fn fixing_one_kind_leaves_other_issues_untouched() {
    let mut session = Session::with_seed(7);
    let original = session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    assert_eq!(original.count_by_kind(IssueKind::Spelling), 4);

    let report = session
        .apply_fixes_by_kind(KindSelector::Kind(IssueKind::Spelling))
        .unwrap();

    assert_eq!(report.applied, 4);
    assert!(report.skipped.is_empty());
    let expected: Vec<_> = original
        .issues
        .iter()
        .filter(|i| i.kind != IssueKind::Spelling)
        .cloned()
        .collect();
    assert_eq!(report.analysis.issues, expected);
    assert!(report.text.starts_with("The committee could of met"));
    assert!(report.text.contains("We receive many letters"));
    assert!(report.text.contains("It is necessary to accommodate"));
    assert_eq!(session.document_text().unwrap(), report.text);
}

#[test]
fn fix_all_literal_only_keeps_advisory_issues() {
    let mut session = Session::with_seed(8);
    let original = session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    let advisory = original.issues.iter().filter(|i| i.is_advisory()).count();
    assert!(advisory > 0);

    let report = session
        .apply_fixes_with(KindSelector::All, FixMode::LiteralOnly)
        .unwrap();
    assert_eq!(report.analysis.issues.len(), advisory);
    assert!(report.analysis.issues.iter().all(|i| i.is_advisory()));
    assert!(report.text.contains("could have met"));
    assert!(report.text.contains("they were late because the roads"));
    assert!(report.text.contains("every member to succeed."));
}

#[test]
fn fix_all_empties_the_issue_list() {
    let mut session = Session::with_seed(9);
    session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    let report = session.apply_fixes_by_kind(KindSelector::All).unwrap();
    assert!(report.analysis.issues.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn apply_single_fix_by_id() {
    let mut session = Session::with_seed(10);
    let analysis = session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    let target = analysis
        .issues
        .iter()
        .find(|i| i.matched_text == "could of")
        .unwrap()
        .clone();

    let report = session.apply_fix(&target.id).unwrap();
    assert!(report.text.contains("could have met"));
    assert_eq!(report.analysis.issues.len(), analysis.issues.len() - 1);
    assert!(report.analysis.issue(&target.id).is_none());

    let again = session.apply_fix(&target.id).unwrap_err();
    assert!(matches!(again, EngineError::UnknownIssue(_)));
}

#[test]
fn fixes_need_an_active_document() {
    let mut session = Session::with_seed(11);
    assert!(matches!(
        session.apply_fix("grammar-0-0-0"),
        Err(EngineError::NoActiveDocument)
    ));
    assert!(matches!(
        session.apply_fixes_by_kind(KindSelector::All),
        Err(EngineError::NoActiveDocument)
    ));
}

#[test]
fn simulated_scores_hold_steady_across_fixes() {
    let mut session = Session::with_seed(12);
    let before = session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    let after = session
        .apply_fixes_by_kind(KindSelector::Kind(IssueKind::Spelling))
        .unwrap()
        .analysis;
    assert_eq!(before.grammar_score, after.grammar_score);
    assert_eq!(before.style_score, after.style_score);
    assert_eq!(before.overall_score, after.overall_score);
}

#[test]
fn deterministic_scores_improve_after_fixes() {
    let mut session = Session::with_seed(13).with_scoring(ScoringMode::Deterministic);
    let before = session.analyze(ESSAY, &AnalysisOptions::default()).unwrap();
    let after = session
        .apply_fixes_by_kind(KindSelector::Kind(IssueKind::Spelling))
        .unwrap()
        .analysis;
    assert!(after.grammar_score > before.grammar_score);
    assert_eq!(after.style_score, before.style_score);
}

#[test]
fn same_seed_same_analysis() {
    let options = AnalysisOptions {
        check_plagiarism: true,
        ..AnalysisOptions::default()
    };
    let a = Session::with_seed(14).analyze(ESSAY, &options).unwrap();
    let b = Session::with_seed(14).analyze(ESSAY, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn detectors_do_not_influence_each_other() {
    let full = Session::with_seed(15)
        .analyze(
            ESSAY,
            &AnalysisOptions {
                check_plagiarism: true,
                ..AnalysisOptions::default()
            },
        )
        .unwrap();
    let grammar_only = Session::with_seed(15)
        .analyze(
            ESSAY,
            &AnalysisOptions {
                check_grammar: true,
                ..AnalysisOptions::none()
            },
        )
        .unwrap();

    let strip = |issues: Vec<&Issue>| -> Vec<(Position, String)> {
        issues
            .into_iter()
            .map(|i| (i.position, i.suggestion.clone()))
            .collect()
    };
    assert_eq!(
        strip(issues_of(&full, IssueKind::Grammar)),
        strip(issues_of(&grammar_only, IssueKind::Grammar))
    );
    assert_eq!(
        grammar_only.issues.len(),
        grammar_only.count_by_kind(IssueKind::Grammar)
    );
}

#[test]
fn history_keeps_five_newest() {
    let mut session = Session::with_seed(16);
    let filler = "Plain words fill this line. ".repeat(5);
    for i in 0..6 {
        let text = format!("Document number {i}. {filler}");
        session.analyze(&text, &AnalysisOptions::default()).unwrap();
    }
    let history = session.history();
    assert_eq!(history.len(), 5);
    assert!(history[0].title_snippet.starts_with("Document number 5"));
    assert!(history[4].title_snippet.starts_with("Document number 1"));
    for entry in &history {
        assert!(entry.title_snippet.chars().count() <= 40);
    }
    assert_eq!(history[0].word_count, 28);

    session.reset();
    assert!(session.history().is_empty());
    assert!(session.document().is_none());
}

#[test]
fn chicago_style_fixes_narrative_citation() {
    let text = "As Jones (2015) showed, the effect holds across every sample we examined \
                in the two years that followed the original study.";
    let options = AnalysisOptions::none()
        .with_document_type(DocumentType::Academic)
        .with_citation_style(CitationStyle::Chicago);
    let options = AnalysisOptions {
        check_citations: true,
        ..options
    };
    let mut session = Session::with_seed(17);
    let analysis = session.analyze(text, &options).unwrap();
    assert_eq!(analysis.citations.len(), 1);
    assert_eq!(analysis.citations[0].problems.len(), 1);

    let report = session
        .apply_fixes_by_kind(KindSelector::Kind(IssueKind::Citation))
        .unwrap();
    assert!(report.text.starts_with("As (Jones 2015) showed"));
    assert_eq!(report.analysis.citations.len(), 1);
}

#[test]
fn analysis_serializes_to_json() {
    let analysis = Session::with_seed(18)
        .analyze(ESSAY, &AnalysisOptions::default())
        .unwrap();
    let json = serde_json::to_string_pretty(&analysis).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "word_count",
        "reading_time_minutes",
        "readability_score",
        "readability_level",
        "grammar_score",
        "style_score",
        "overall_score",
        "citations",
        "issues",
    ] {
        assert!(parsed.get(key).is_some(), "missing {key}");
    }
    let first = &parsed["issues"][0];
    assert!(first.get("match").is_some());
    assert!(first["position"].get("paragraph_index").is_some());
}

#[test]
fn repeated_word_runs_fix_one_pair_at_a_time() {
    let text = "We saw the the the dog and it it it barked. \
                The rest of the walk home was quiet and uneventful for everyone.";
    let options = AnalysisOptions {
        check_style: true,
        ..AnalysisOptions::none()
    };
    let mut session = Session::with_seed(19);
    let analysis = session.analyze(text, &options).unwrap();

    let style = issues_of(&analysis, IssueKind::Style);
    let matched: Vec<&str> = style.iter().map(|i| i.matched_text.as_str()).collect();
    assert_eq!(matched, vec!["the the", "it it"]);
    assert_eq!(style[0].position, Position::new(0, 7, 14));
    assert_eq!(style[1].position, Position::new(0, 27, 32));

    let report = session
        .apply_fixes_by_kind(KindSelector::Kind(IssueKind::Style))
        .unwrap();
    assert_eq!(report.stale, 0);
    let expected = "We saw the the dog and it it barked. \
                    The rest of the walk home was quiet and uneventful for everyone.";
    assert_eq!(report.text, expected);
}

/// Flags the word "LOUD" and nothing else.
struct ShoutDetector;

impl Detector for ShoutDetector {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Style
    }

    fn enabled(&self, _options: &AnalysisOptions) -> bool {
        true
    }

    fn detect(
        &self,
        paragraphs: &[String],
        _options: &AnalysisOptions,
        _rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if let Some(start) = paragraph.find("LOUD") {
                let end = start + "LOUD".len();
                out.push(
                    Finding::at(IssueKind::Style, Severity::Low, i, paragraph, start, end)
                        .suggest("loud"),
                );
            }
        }
        out
    }
}

#[test]
fn custom_detectors_replace_the_defaults() {
    let text = "Teh crowd grew LOUD as the band walked on stage, and nobody in the hall \
                could hear the announcer over the noise.";
    let mut session = Session::with_seed(20).with_detectors(vec![Box::new(ShoutDetector)]);
    let analysis = session.analyze(text, &AnalysisOptions::default()).unwrap();

    assert_eq!(analysis.issues.len(), 1);
    assert_eq!(analysis.issues[0].matched_text, "LOUD");
    assert_eq!(analysis.count_by_kind(IssueKind::Spelling), 0);

    let report = session.apply_fixes_by_kind(KindSelector::All).unwrap();
    assert!(report.text.starts_with("Teh crowd grew loud as"));
    assert!(report.analysis.issues.is_empty());
}
