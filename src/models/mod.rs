pub mod anchor;
pub mod candidate;
pub mod document;
pub mod loaders;
pub mod question;
pub mod report;
pub mod section;

pub use anchor::{Anchor, AnchorTableFile};
pub use candidate::CandidateMetadata;
pub use document::SheetDocument;
pub use loaders::load_anchor_file;
pub use question::{QuestionRecord, QuestionStatus};
pub use report::{ScoreReport, SectionScore, SheetReport};
pub use section::Section;
