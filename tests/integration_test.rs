use extract_question_merge::config::{Command, Config};
use extract_question_merge::error::{ExtractError, MergeError};
use extract_question_merge::models::question::{
    CorrectAnswer, Difficulty, ExamInfo, QuestionBank, QuestionRecord,
};
use extract_question_merge::models::load_corrections;
use extract_question_merge::models::topic::Topic;
use extract_question_merge::orchestrator::run_merge;
use extract_question_merge::services::bank_store::{self, BankStore};
use extract_question_merge::services::{
    AnswerIdentifier, GapAnalyzer, MergeService, QuestionExtractor, SummaryReporter,
    TopicClassifier,
};
use extract_question_merge::workflow::{ExtractCtx, ExtractFlow, ExtractResult};
use std::path::Path;

/// RAID 题目样例：题干一行、四个选项、单行解释，随后是下一题的标记
const RAID_SOURCE: &str = "58. A computer technician is installing a RAID. If the RAID uses mirroring and striping, which RAID level is the technician using?\nRAID 0\nRAID 1\nRAID 5\nRAID 10\nExplanation: RAID 10 combines mirroring and striping.\n59. Which type of network spans a single building?\nLAN\nWAN\n";

fn make_record(id: u32, number: u32) -> QuestionRecord {
    QuestionRecord {
        id,
        number,
        question: format!("Question {}", number),
        options: vec!["A".to_string(), "B".to_string()],
        correct_answer: CorrectAnswer::Single("A".to_string()),
        explanation: String::new(),
        topic: "General IT".to_string(),
        difficulty: Difficulty::Medium,
        needs_review: false,
    }
}

fn make_bank(numbers: &[u32]) -> QuestionBank {
    let questions: Vec<QuestionRecord> = numbers
        .iter()
        .enumerate()
        .map(|(i, &n)| make_record(i as u32 + 1, n))
        .collect();
    QuestionBank {
        exam_info: ExamInfo {
            total_questions: questions.len(),
            last_updated: "2025-08-01".to_string(),
            extra: serde_json::Map::new(),
        },
        questions,
    }
}

// ========== 题块提取 ==========

#[test]
fn extract_parses_stem_options_and_explanation() {
    let extractor = QuestionExtractor::new();

    let block = extractor
        .extract(RAID_SOURCE, 58)
        .expect("题号 58 应当提取成功");

    assert_eq!(
        block.stem,
        "A computer technician is installing a RAID. If the RAID uses mirroring and striping, which RAID level is the technician using?"
    );
    assert_eq!(block.options, vec!["RAID 0", "RAID 1", "RAID 5", "RAID 10"]);
    assert_eq!(block.explanation, "RAID 10 combines mirroring and striping.");
    assert_eq!(block.number, 58);
}

#[test]
fn extract_absent_number_signals_not_found() {
    let extractor = QuestionExtractor::new();

    let result = extractor.extract(RAID_SOURCE, 60);

    assert_eq!(result.unwrap_err(), ExtractError::NotFound { number: 60 });
}

#[test]
fn marker_must_not_match_longer_number() {
    // 题号 2 不能命中 "25." 开头的行
    let source = "25. Which component stores firmware?\nBIOS chip\nCPU\n";
    let extractor = QuestionExtractor::new();

    let result = extractor.extract(source, 2);

    assert_eq!(result.unwrap_err(), ExtractError::NotFound { number: 2 });
}

#[test]
fn marker_must_start_at_column_zero() {
    // 缩进或引用中的 "2." 不是题目标记
    let source = "  2. quoted text inside another answer\nreal content\n";
    let extractor = QuestionExtractor::new();

    let result = extractor.extract(source, 2);

    assert_eq!(result.unwrap_err(), ExtractError::NotFound { number: 2 });
}

#[test]
fn empty_stem_is_a_soft_failure() {
    let source = "7.  \nOption A\nOption B\n8. Next question here\n";
    let extractor = QuestionExtractor::new();

    let result = extractor.extract(source, 7);

    assert_eq!(result.unwrap_err(), ExtractError::EmptyStem { number: 7 });
}

#[test]
fn stem_whitespace_is_collapsed() {
    let source = "3. What   does\tRAM    stand for?\nRandom Access Memory\nRead Only Memory\nRapid Access Mode\n";
    let extractor = QuestionExtractor::new();

    let block = extractor.extract(source, 3).expect("题号 3 应当提取成功");

    assert_eq!(block.stem, "What does RAM stand for?");
}

#[test]
fn options_are_truncated_to_four_only_when_four_or_more() {
    let five = "1. Pick one option from the list below?\nAlpha option\nBeta option\nGamma option\nDelta option\nEpsilon option\n";
    let three = "1. Pick one option from the list below?\nAlpha option\nBeta option\nGamma option\n";
    let extractor = QuestionExtractor::new();

    let block_five = extractor.extract(five, 1).expect("五选项题应当提取成功");
    assert_eq!(
        block_five.options,
        vec!["Alpha option", "Beta option", "Gamma option", "Delta option"]
    );

    let block_three = extractor.extract(three, 1).expect("三选项题应当提取成功");
    assert_eq!(
        block_three.options,
        vec!["Alpha option", "Beta option", "Gamma option"],
        "不足 4 个选项时原样保留，不补齐"
    );
}

#[test]
fn explanation_spans_lines_until_other_case() {
    let source = "12. Why does the laptop battery drain quickly?\nBattery age\nScreen brightness\nExplanation: Battery capacity degrades over time.\nHigh screen brightness also drains power.\nOther case: ignore this trailing text\nStray line after explanation\n";
    let extractor = QuestionExtractor::new();

    let block = extractor.extract(source, 12).expect("题号 12 应当提取成功");

    assert_eq!(
        block.explanation,
        "Battery capacity degrades over time. High screen brightness also drains power."
    );
    // 解释结束后整块解析停止，后面的行不再计为选项
    assert_eq!(block.options, vec!["Battery age", "Screen brightness"]);
}

#[test]
fn skip_rules_drop_noise_lines() {
    let source = "9. Which cable type is used for ethernet networks?\n(Choose two)\nok\nCase study follows\nCoaxial cable\nFiber optic cable\nAll answer choices below are ranked:\n10. Next\n";
    let extractor = QuestionExtractor::new();

    let block = extractor.extract(source, 9).expect("题号 9 应当提取成功");

    // 括号行、短于 3 字符、"case" 开头、":" 结尾的行都不是选项
    assert_eq!(block.options, vec!["Coaxial cable", "Fiber optic cable"]);
    assert_eq!(block.explanation, "");
}

// ========== 答案识别 ==========

#[test]
fn answer_window_confirms_first_indicated_option() {
    let identifier = AnswerIdentifier::new();
    let options = vec!["LAN".to_string(), "WAN".to_string()];

    let guess = identifier.identify(
        &options,
        "A LAN is smaller than a WAN and is the correct choice",
        "Which network type?",
    );

    assert_eq!(guess.answer, "LAN");
    assert!(!guess.needs_review, "窗口内出现指示词时不需要复核");
}

#[test]
fn answer_defaults_to_first_option_with_review_flag() {
    let identifier = AnswerIdentifier::new();
    let options = vec!["RAID 0".to_string(), "RAID 1".to_string()];

    let guess = identifier.identify(&options, "", "Which RAID level?");

    assert_eq!(guess.answer, "RAID 0");
    assert!(guess.needs_review, "缺乏佐证的默认猜测必须标记复核");
}

#[test]
fn matching_stem_defaults_to_first_option() {
    let identifier = AnswerIdentifier::new();
    let options = vec!["DDR3".to_string(), "DDR4".to_string()];

    let guess = identifier.identify(&options, "", "Match the memory type to the feature.");

    assert_eq!(guess.answer, "DDR3");
    assert!(guess.needs_review);
}

#[test]
fn empty_options_yield_empty_answer() {
    let identifier = AnswerIdentifier::new();

    let guess = identifier.identify(&[], "some explanation", "some stem");

    assert_eq!(guess.answer, "");
    assert!(guess.needs_review);
}

// ========== 主题分类 ==========

#[test]
fn classifier_scores_raid_question_as_hardware() {
    let classifier = TopicClassifier::new();

    let topic = classifier.classify("A technician is installing a RAID. RAID 0 RAID 1 RAID 5 RAID 10");

    assert_eq!(topic, Topic::Hardware);
}

#[test]
fn classifier_falls_back_to_general_it() {
    let classifier = TopicClassifier::new();

    let topic = classifier.classify("Which of these statements describes the purpose of the device?");

    assert_eq!(topic, Topic::GeneralIt);
}

#[test]
fn classifier_is_deterministic() {
    let classifier = TopicClassifier::new();
    let content = "Which command shows network configuration? ipconfig netstat ping tracert";

    let first = classifier.classify(content);
    let second = classifier.classify(content);

    assert_eq!(first, second);
}

// ========== 提取流程 ==========

#[test]
fn flow_assembles_full_record_for_raid_example() {
    let flow = ExtractFlow::new();
    let ctx = ExtractCtx::new(58, 1, 1);

    let result = flow.run(RAID_SOURCE, &ctx);

    let record = match result {
        ExtractResult::Extracted(record) => record,
        ExtractResult::Failed(number) => panic!("题号 {} 不应提取失败", number),
    };

    assert_eq!(record.number, 58);
    assert_eq!(record.id, 1058, "合并前的临时 id 为 1000 + 题号");
    assert_eq!(record.topic, "Hardware");
    assert_eq!(record.difficulty, Difficulty::Medium);
    assert_eq!(record.options.len(), 4);
    // 该解释的指示词窗口内没有任何正向指示词，启发式回退到第一个选项并标记复核
    assert_eq!(
        record.correct_answer,
        CorrectAnswer::Single("RAID 0".to_string())
    );
    assert!(record.needs_review);
}

#[test]
fn flow_folds_missing_number_into_failure() {
    let flow = ExtractFlow::new();
    let ctx = ExtractCtx::new(999, 1, 1);

    match flow.run(RAID_SOURCE, &ctx) {
        ExtractResult::Failed(number) => assert_eq!(number, 999),
        ExtractResult::Extracted(_) => panic!("缺失题号不应提取成功"),
    }
}

// ========== 题号差距分析 ==========

#[test]
fn gap_analyzer_reports_gaps_duplicates_and_differences() {
    let bank = make_bank(&[1, 2, 3, 5, 7]);
    let source = "1. First question here\n2. Second question here\n2. Second question repeated\n6. Sixth question here\n8. Eighth question here\n";
    let analyzer = GapAnalyzer::new();

    let report = analyzer.analyze(&bank, source);

    assert_eq!(report.store_numbers, vec![1, 2, 3, 5, 7]);
    assert_eq!(report.missing_from_store, vec![4, 6]);
    assert_eq!(report.source_numbers, vec![1, 2, 2, 6, 8]);
    assert_eq!(report.source_duplicates, vec![2]);
    assert_eq!(report.in_source_not_store, vec![6, 8]);
    assert_eq!(report.in_store_not_source, vec![3, 5, 7]);
    assert_eq!(report.numbers_to_extract(), vec![4, 6, 8]);
}

#[test]
fn gap_analyzer_is_idempotent() {
    let bank = make_bank(&[1, 3]);
    let source = "1. Alpha question here\n4. Delta question here\n";
    let analyzer = GapAnalyzer::new();

    let first = analyzer.analyze(&bank, source);
    let second = analyzer.analyze(&bank, source);

    assert_eq!(first, second);
}

#[test]
fn gap_analyzer_handles_empty_source() {
    let bank = make_bank(&[1, 2]);
    let analyzer = GapAnalyzer::new();

    let report = analyzer.analyze(&bank, "no markers in this text at all\n");

    assert!(report.source_numbers.is_empty());
    assert!(report.source_duplicates.is_empty());
    assert!(report.in_source_not_store.is_empty());
    assert_eq!(report.in_store_not_source, vec![1, 2]);
}

// ========== 合并 ==========

#[test]
fn merge_appends_sorts_and_renumbers() {
    let mut bank = make_bank(&[10, 20, 30, 40, 50]);
    let new_records = vec![make_record(1025, 25), make_record(1034, 34), make_record(1052, 52)];

    let outcome = MergeService::new()
        .merge(&mut bank, new_records)
        .expect("合并应当成功");

    assert_eq!(outcome.added, 3);
    assert_eq!(outcome.total, 8);
    assert_eq!(bank.exam_info.total_questions, 8);

    let numbers: Vec<u32> = bank.questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![10, 20, 25, 30, 34, 40, 50, 52], "按题号升序");

    let ids: Vec<u32> = bank.questions.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8], "id 重排为连续序列");

    assert!(!bank.exam_info.last_updated.is_empty());
}

#[test]
fn merge_rejects_duplicate_numbers_without_mutation() {
    let mut bank = make_bank(&[10, 20]);
    let new_records = vec![make_record(1020, 20)];

    let err = MergeService::new()
        .merge(&mut bank, new_records)
        .expect_err("重复题号应当校验失败");

    assert!(matches!(err, MergeError::Validation { .. }));
    assert_eq!(bank.questions.len(), 2, "校验失败时题库保持原样");
    assert_eq!(bank.exam_info.total_questions, 2);
}

#[test]
fn merge_flags_placeholder_answers_for_review() {
    let mut bank = make_bank(&[1]);
    let mut matching = make_record(1052, 52);
    matching.question = "Match the memory type to the feature.".to_string();
    matching.options = vec!["DDR3".to_string(), "DDR4".to_string(), "ECC".to_string()];
    matching.correct_answer = CorrectAnswer::Single("Multiple matching pairs".to_string());

    let outcome = MergeService::new()
        .merge(&mut bank, vec![matching])
        .expect("占位答案不应导致合并失败");

    assert_eq!(outcome.flagged, 1);
    let merged = bank
        .questions
        .iter()
        .find(|q| q.number == 52)
        .expect("配对题应当已并入");
    assert!(merged.needs_review, "占位答案必须标记待复核");
}

// ========== 存储与备份 ==========

#[tokio::test]
async fn store_roundtrip_preserves_questions() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let store_path = dir.path().join("questions.json");
    let backup_path = dir.path().join("questions_backup.json");

    let bank = make_bank(&[1, 2, 3]);
    let store = BankStore::with_paths(&store_path, &backup_path);

    store.save(&bank).await.expect("写入存储失败");
    let loaded = store.load().await.expect("读回存储失败");

    assert_eq!(loaded.questions.len(), 3);
    assert_eq!(
        serde_json::to_value(&loaded.questions).unwrap(),
        serde_json::to_value(&bank.questions).unwrap()
    );
}

#[tokio::test]
async fn backup_is_a_faithful_snapshot() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let store_path = dir.path().join("questions.json");
    let backup_path = dir.path().join("questions_backup.json");

    let bank = make_bank(&[5, 6]);
    let store = BankStore::with_paths(&store_path, &backup_path);
    store.save(&bank).await.expect("写入存储失败");

    store.backup().await.expect("备份失败");

    let original = std::fs::read(&store_path).expect("读取存储失败");
    let snapshot = std::fs::read(&backup_path).expect("读取备份失败");
    assert_eq!(original, snapshot, "备份必须是逐字节拷贝");

    let decoded: QuestionBank =
        serde_json::from_slice(&snapshot).expect("备份应当可解码");
    assert_eq!(
        serde_json::to_value(&decoded.questions).unwrap(),
        serde_json::to_value(&bank.questions).unwrap()
    );
}

fn write_store_files(dir: &Path, bank: &QuestionBank) -> Config {
    let store_file = dir.join("questions.json").display().to_string();
    std::fs::write(
        &store_file,
        serde_json::to_string_pretty(bank).expect("序列化题库失败"),
    )
    .expect("写入存储文件失败");

    Config {
        store_file,
        source_file: dir.join("webtext.md").display().to_string(),
        report_file: dir.join("missing_questions.json").display().to_string(),
        backup_file: dir.join("questions_backup.json").display().to_string(),
        corrections_file: dir.join("corrections.toml").display().to_string(),
        verbose_logging: false,
        output_log_file: dir.join("output.txt").display().to_string(),
    }
}

#[tokio::test]
async fn merge_run_updates_store_and_writes_backup() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let bank = make_bank(&[10, 20, 30]);
    let config = write_store_files(dir.path(), &bank);

    let corrections = r#"
[[questions]]
id = 1025
number = 25
question = "Which type of network spans a single building or campus?"
options = ["PAN", "WAN", "LAN", "MAN"]
correct_answer = "LAN"
explanation = "A LAN is smaller or more contained than a WAN."
topic = "Networking"
difficulty = "medium"
"#;
    std::fs::write(&config.corrections_file, corrections).expect("写入修正文件失败");

    let pre_merge = std::fs::read(&config.store_file).expect("读取存储失败");

    run_merge(&config, bank, false).await.expect("合并应当成功");

    // 备份等于合并前的存储
    let snapshot = std::fs::read(&config.backup_file).expect("读取备份失败");
    assert_eq!(pre_merge, snapshot);

    // 主存储已更新并重排
    let updated: QuestionBank = serde_json::from_str(
        &std::fs::read_to_string(&config.store_file).expect("读取存储失败"),
    )
    .expect("解析更新后的存储失败");
    assert_eq!(updated.exam_info.total_questions, 4);
    let numbers: Vec<u32> = updated.questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![10, 20, 25, 30]);
    let ids: Vec<u32> = updated.questions.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn merge_aborts_when_backup_cannot_be_written() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let bank = make_bank(&[10, 20]);
    let mut config = write_store_files(dir.path(), &bank);
    // 备份目录不存在，备份写入必然失败
    config.backup_file = dir
        .path()
        .join("no_such_dir/questions_backup.json")
        .display()
        .to_string();

    let corrections = r#"
[[questions]]
id = 1025
number = 25
question = "Placeholder question for backup failure case?"
options = ["A", "B"]
correct_answer = "A"
topic = "General IT"
"#;
    std::fs::write(&config.corrections_file, corrections).expect("写入修正文件失败");

    let before = std::fs::read(&config.store_file).expect("读取存储失败");

    let result = run_merge(&config, bank, false).await;
    assert!(result.is_err(), "备份失败必须中止合并");

    let after = std::fs::read(&config.store_file).expect("读取存储失败");
    assert_eq!(before, after, "备份失败时主存储必须保持原样");
}

// ========== 修正文件与报告 ==========

#[tokio::test]
async fn corrections_loader_reads_records() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let path = dir.path().join("corrections.toml");

    let corrections = r#"
[[questions]]
id = 334
number = 34
question = "Place the six stages of the troubleshooting process in the correct order."
options = ["1. Identify the problem", "2. Establish a theory"]
correct_answer = ["1. Identify the problem", "2. Establish a theory"]
explanation = "The six stages of troubleshooting in order."
topic = "Troubleshooting"
difficulty = "medium"
"#;
    std::fs::write(&path, corrections).expect("写入修正文件失败");

    let records = load_corrections(&path).await.expect("加载修正文件失败");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number, 34);
    assert_eq!(
        records[0].correct_answer,
        CorrectAnswer::Multiple(vec![
            "1. Identify the problem".to_string(),
            "2. Establish a theory".to_string()
        ])
    );
}

#[tokio::test]
async fn extraction_report_roundtrips_through_json() {
    use extract_question_merge::models::report::ExtractionReport;

    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let path = dir.path().join("missing_questions.json");

    let report = ExtractionReport::new(
        vec![make_record(1058, 58)],
        vec![131],
        vec![58, 131],
        "2025-08-13".to_string(),
    );

    bank_store::save_report(&path, &report)
        .await
        .expect("写出报告失败");
    let loaded = bank_store::load_report(&path).await.expect("读回报告失败");

    assert_eq!(loaded.extracted_questions.len(), 1);
    assert_eq!(loaded.failed_extractions, vec![131]);
    assert_eq!(loaded.extraction_info.total_extracted, 1);
    assert_eq!(loaded.extraction_info.total_failed, 1);
    assert_eq!(loaded.extraction_info.missing_numbers, vec![58, 131]);
}

// ========== 序列化细节 ==========

#[test]
fn correct_answer_serializes_untagged() {
    let single = CorrectAnswer::Single("LAN".to_string());
    assert_eq!(serde_json::to_value(&single).unwrap(), serde_json::json!("LAN"));

    let multiple = CorrectAnswer::Multiple(vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        serde_json::to_value(&multiple).unwrap(),
        serde_json::json!(["A", "B"])
    );

    let decoded: CorrectAnswer = serde_json::from_str("\"Multiple matching pairs\"").unwrap();
    assert_eq!(
        decoded,
        CorrectAnswer::Single("Multiple matching pairs".to_string())
    );
}

#[test]
fn needs_review_is_omitted_when_false() {
    let record = make_record(1, 1);
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("needs_review").is_none());

    let mut flagged = make_record(2, 2);
    flagged.needs_review = true;
    let value = serde_json::to_value(&flagged).unwrap();
    assert_eq!(value.get("needs_review"), Some(&serde_json::json!(true)));
}

#[test]
fn legacy_store_records_deserialize_with_defaults() {
    // 旧存储文件中没有 needs_review 字段，difficulty 也可能缺失
    let json = r#"{
        "id": 1,
        "number": 25,
        "question": "Which type of network spans a single building?",
        "options": ["PAN", "WAN", "LAN", "MAN"],
        "correct_answer": "LAN",
        "explanation": "",
        "topic": "Networking"
    }"#;

    let record: QuestionRecord = serde_json::from_str(json).expect("旧记录应当可解析");
    assert_eq!(record.difficulty, Difficulty::Medium);
    assert!(!record.needs_review);
}

// ========== 统计摘要 ==========

#[test]
fn summary_counts_answer_types_and_gaps() {
    let mut bank = make_bank(&[1, 2, 4]);
    bank.questions[0].correct_answer =
        CorrectAnswer::Multiple(vec!["A".to_string(), "B".to_string()]);
    bank.questions[1].question = "Match the file system with the description.".to_string();
    bank.questions[1].correct_answer =
        CorrectAnswer::Single("Multiple matching pairs".to_string());
    bank.questions[2].needs_review = true;

    let reporter = SummaryReporter::new();

    let types = reporter.answer_type_stats(&bank);
    assert_eq!(types.multiple_choice, 1);
    assert_eq!(types.matching, 1);
    assert_eq!(types.single_choice, 1);

    assert_eq!(reporter.numbering_gaps(&bank), vec![3]);
    assert_eq!(reporter.needs_review_count(&bank), 1);

    let distribution = reporter.topic_distribution(&bank);
    assert_eq!(distribution, vec![("General IT".to_string(), 3)]);
}

// ========== 命令解析 ==========

#[test]
fn command_parsing_covers_all_modes() {
    assert_eq!(Command::parse(&[]).unwrap(), Command::Extract);
    assert_eq!(
        Command::parse(&["analyze".to_string()]).unwrap(),
        Command::Analyze
    );
    assert_eq!(
        Command::parse(&["merge".to_string()]).unwrap(),
        Command::Merge { from_report: false }
    );
    assert_eq!(
        Command::parse(&["merge".to_string(), "--from-report".to_string()]).unwrap(),
        Command::Merge { from_report: true }
    );
    assert_eq!(
        Command::parse(&["summary".to_string()]).unwrap(),
        Command::Summary
    );
    assert!(Command::parse(&["bogus".to_string()]).is_err());
}
