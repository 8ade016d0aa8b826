// All LLM prompt constants for the AI endpoints.
// `{placeholders}` are substituted before sending.

/// System instruction for JD analysis — enforces JSON-only output.
pub const ANALYZE_JD_SYSTEM: &str =
    "You are an expert ATS (Applicant Tracking System) analyzer. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD analysis prompt template. Replace `{jd_text}` before sending.
pub const ANALYZE_JD_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract keywords. Categorize them into:
1. technicalSkills - Programming languages, frameworks, technical abilities
2. tools - Software, platforms, tools mentioned
3. softSkills - Communication, leadership, interpersonal skills
4. methodologies - Agile, Scrum, DevOps, processes

For each category, rank keywords by importance (most important first).
Only include keywords that appear in the JD or are strongly implied.

Return ONLY valid JSON in this exact format:
{
  "technicalSkills": ["skill1", "skill2"],
  "tools": ["tool1", "tool2"],
  "softSkills": ["skill1", "skill2"],
  "methodologies": ["method1", "method2"],
  "seniorityLevel": "junior|mid|senior|lead",
  "roleType": "string describing the role"
}

Job Description:
"""
{jd_text}
"""
"#;

/// System instruction for bullet rewriting and summary generation.
pub const RESUME_WRITER_SYSTEM: &str =
    "You are a professional resume writer specializing in ATS optimization.";

/// Bullet rewrite prompt template.
/// Replace `{bullet_point}`, `{keyword}`, and `{context_line}` before sending.
pub const REWRITE_BULLET_PROMPT_TEMPLATE: &str = r#"TASK: Rewrite this resume bullet point to naturally include the keyword "{keyword}".

STRICT RULES:
1. Maximum 25 words
2. Start with a strong action verb (Led, Developed, Implemented, etc.)
3. Include quantifiable results if context allows (%, $, numbers)
4. Keep the original meaning - DO NOT fabricate experience
5. Professional tone, no buzzwords or fluff
6. The keyword must fit naturally, not forced

Original bullet: "{bullet_point}"
{context_line}

Respond with ONLY the rewritten bullet point, nothing else.
"#;

/// Professional summary prompt template.
/// Replace `{keywords}`, `{role}`, `{company}`, `{skills}`, and
/// `{role_count}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a compelling 2-3 sentence professional summary for this candidate.
Target these keywords if relevant: {keywords}

Candidate Info:
- Current/Recent Role: {role}
- Industry: {company}
- Key Skills: {skills}
- Years Experience: {role_count}+ roles

Rules:
- Maximum 50 words
- No first person ("I am")
- Include 1-2 target keywords naturally
- Focus on value proposition

Respond with ONLY the summary text.
"#;
