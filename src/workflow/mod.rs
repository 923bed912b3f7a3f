pub mod answer_tracker;
pub mod exam_session;
pub mod session_timer;

pub use answer_tracker::AnswerTracker;
pub use exam_session::{
    submit_prompt, AssumeYes, Confirm, ExamSession, Notice, SessionCommand, SessionEvent,
    SessionOutcome, SessionPhase, SubmitTrigger,
};
pub use session_timer::SessionTimer;
