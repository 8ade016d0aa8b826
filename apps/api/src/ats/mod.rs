// ATS scoring engine: keyword categories, the weighted coverage scorer,
// and searchable-résumé-text assembly. Everything here is pure — LLM calls
// live in `ai`.

pub mod keywords;
pub mod resume_text;
pub mod scoring;
