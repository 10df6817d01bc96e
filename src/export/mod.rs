pub(crate) mod exporter;
pub(crate) mod job;
pub(crate) mod seam;
