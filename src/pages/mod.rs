pub mod resume_analyzer;
