//! Whole-run tests: items in, instruction stream and summary out.

use qtag::{
    CancelFlag, ContentItem, EmissionSequencer, Instruction, InstructionBatch, OutputFormat,
    RecordingSink, Sink, SinkError, StreamSink, StyleId,
};

fn question_set() -> Vec<ContentItem> {
    ContentItem::from_lines([
        "[지문] 단락입니다.",
        "[문제] 다음 글을 읽고...",
        "[보기] 예시1",
        "[보기] 예시2",
        "[선택지] ① 가",
        "[선택지] ② 나",
        "[교사용정답] 정답) ① 해설) ...",
    ])
}

/// (style, blank before, separator units) for every emitted item
fn layout(batches: &[InstructionBatch]) -> Vec<(StyleId, bool, usize)> {
    batches
        .iter()
        .map(|b| (b.style, b.blank_before, b.separator_units))
        .collect()
}

#[test]
fn test_question_set_layout() {
    let batches = EmissionSequencer::default().plan_all(&question_set());

    assert_eq!(
        layout(&batches),
        vec![
            (StyleId::BodyText, false, 2),
            (StyleId::Question, true, 2),
            (StyleId::ContextIndent, true, 1),
            (StyleId::ContextIndent, false, 1),
            (StyleId::ChoiceList, true, 1),
            (StyleId::ChoiceList, false, 1),
            (StyleId::TeacherAnswer, false, 2),
        ]
    );
}

#[test]
fn test_question_set_through_recording_sink() {
    let mut sink = RecordingSink::new();
    let summary = EmissionSequencer::default().run(&question_set(), &mut sink, &CancelFlag::new());

    assert_eq!(summary.succeeded, 7);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total, 7);

    let instructions = sink.into_instructions();
    // 7 items x 3 instructions, plus 3 blanks x 2 instructions
    assert_eq!(instructions.len(), 27);
    assert_eq!(
        &instructions[3..8],
        &[
            Instruction::SetStyle {
                style: StyleId::TeacherAnswer
            },
            Instruction::InsertSeparator { count: 1 },
            Instruction::SetStyle {
                style: StyleId::Question
            },
            Instruction::InsertText {
                text: "다음 글을 읽고...".into()
            },
            Instruction::InsertSeparator { count: 2 },
        ]
    );
}

#[test]
fn test_question_set_text_stream() {
    let mut sink = StreamSink::new(Vec::new(), OutputFormat::Text);
    EmissionSequencer::default().run(&question_set(), &mut sink, &CancelFlag::new());
    let out = String::from_utf8(sink.into_inner()).unwrap();

    insta::assert_snapshot!(out.trim_end(), @r###"
#0 passage
  style body-text
  text "단락입니다."
  separator 2
#1 question +blank
  style teacher-answer
  separator 1
  style question
  text "다음 글을 읽고..."
  separator 2
#2 context +blank
  style teacher-answer
  separator 1
  style context-indent
  text "예시1"
  separator 1
#3 context
  style context-indent
  text "예시2"
  separator 1
#4 choice +blank
  style teacher-answer
  separator 1
  style choice-list
  text "① 가"
  separator 1
#5 choice
  style choice-list
  text "② 나"
  separator 1
#6 answer-key
  style teacher-answer
  text "정답) ① 해설) ..."
  separator 2
"###);
}

/// Fails every batch for the given item order, records the order of everything it sees.
struct FailOn {
    order: usize,
    seen: Vec<usize>,
    inner: RecordingSink,
}

impl Sink for FailOn {
    fn set_style(&mut self, style: StyleId) -> Result<(), SinkError> {
        self.inner.set_style(style)
    }

    fn insert_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.inner.insert_text(text)
    }

    fn insert_separator(&mut self, count: usize) -> Result<(), SinkError> {
        self.inner.insert_separator(count)
    }

    fn apply_batch(&mut self, batch: &InstructionBatch) -> Result<(), SinkError> {
        self.seen.push(batch.order);
        if batch.order == self.order {
            return Err(SinkError::Rejected("cursor lost".into()));
        }
        self.inner.apply_batch(batch)
    }
}

#[test]
fn test_sink_failure_does_not_stop_run() {
    let mut sink = FailOn {
        order: 2,
        seen: Vec::new(),
        inner: RecordingSink::new(),
    };
    let summary = EmissionSequencer::default().run(&question_set(), &mut sink, &CancelFlag::new());

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 6);
    assert_eq!(summary.total, 7);
    assert_eq!(summary.failures[0].order, 2);
    assert_eq!(summary.failures[0].preview, "[보기] 예시1");
    assert_eq!(sink.seen, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_failed_item_still_advances_automaton() {
    let mut sink = FailOn {
        order: 2,
        seen: Vec::new(),
        inner: RecordingSink::new(),
    };
    EmissionSequencer::default().run(&question_set(), &mut sink, &CancelFlag::new());

    // The second context line follows the failed first one and gets no blank of its own
    let texts = sink.inner.instructions().to_vec();
    let second_context = texts
        .iter()
        .position(|i| {
            *i == Instruction::InsertText {
                text: "예시2".into(),
            }
        })
        .unwrap();
    assert_eq!(
        texts[second_context - 1],
        Instruction::SetStyle {
            style: StyleId::ContextIndent
        }
    );
    assert_eq!(
        texts[second_context - 2],
        Instruction::InsertSeparator { count: 2 }
    );
}

/// Cancels the run from inside the sink once the given item has been applied.
struct CancelAfter {
    order: usize,
    cancel: CancelFlag,
    applied: Vec<usize>,
}

impl Sink for CancelAfter {
    fn set_style(&mut self, _style: StyleId) -> Result<(), SinkError> {
        Ok(())
    }

    fn insert_text(&mut self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn insert_separator(&mut self, _count: usize) -> Result<(), SinkError> {
        Ok(())
    }

    fn apply_batch(&mut self, batch: &InstructionBatch) -> Result<(), SinkError> {
        self.applied.push(batch.order);
        if batch.order == self.order {
            self.cancel.cancel();
        }
        Ok(())
    }
}

#[test]
fn test_cancellation_between_items() {
    let cancel = CancelFlag::new();
    let mut sink = CancelAfter {
        order: 2,
        cancel: cancel.clone(),
        applied: Vec::new(),
    };
    let summary = EmissionSequencer::default().run(&question_set(), &mut sink, &cancel);

    assert!(summary.cancelled);
    assert_eq!(sink.applied, vec![0, 1, 2]);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.total, 7);
}

#[test]
fn test_generated_output_is_repaired_before_layout() {
    let items = ContentItem::from_lines([
        "[지문또는문단] 물리학에서 파동-입자 이중성은 빛과 전자가 파동과 입자의 성질을 동시에 가진다는 개념이다.",
        "[지문또는문단] [문제] 1. 다음 <보기>를 참고하여 적절한 것은?",
        "[Odyssey]",
        "[보기] 이는 양자역학의 핵심 원리이다.",
        "[지문또는문단] ① 빛은 파동의 성질만 갖는다.",
        "[지문또는문단] ② 전자는 관찰 방법에 따라 다르다.",
        "[지문또는문단] [해설] 정답) ② 해설) 2문단 참조",
        "[지문또는문단] 짧은 조각",
    ]);
    let mut sink = RecordingSink::new();
    let summary = EmissionSequencer::default().run(&items, &mut sink, &CancelFlag::new());
    assert_eq!(summary.dropped, 2);
    assert_eq!(summary.succeeded, 6);

    let batches = EmissionSequencer::default().plan_all(&items);
    assert_eq!(
        layout(&batches),
        vec![
            (StyleId::BodyText, false, 2),
            (StyleId::Question, true, 2),
            (StyleId::ContextIndent, true, 1),
            (StyleId::ChoiceList, true, 1),
            (StyleId::ChoiceList, false, 1),
            (StyleId::TeacherAnswer, false, 2),
        ]
    );
    assert_eq!(batches[1].text, "다음 <보기>를 참고하여 적절한 것은?");
    assert_eq!(batches[3].text, "① 빛은 파동의 성질만 갖는다.");
    assert_eq!(batches[1].order, 1);
    assert_eq!(batches[2].order, 3);
}
