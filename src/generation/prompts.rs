// src/generation/prompts.rs
// Prompt text for every generation call site. Templates carry `{placeholder}`
// markers that the builder functions below fill in.

/// Sampling settings per call site: (temperature, max output tokens).
pub const EXTRACTION_SETTINGS: (f32, u32) = (0.3, 2000);
pub const COMPANY_EXTRACTION_SETTINGS: (f32, u32) = (0.3, 1500);
pub const SUMMARY_SETTINGS: (f32, u32) = (0.7, 500);
pub const BULLET_SETTINGS: (f32, u32) = (0.7, 1000);
pub const COVER_LETTER_DRAFT_SETTINGS: (f32, u32) = (0.7, 1200);
pub const COVER_LETTER_POLISH_SETTINGS: (f32, u32) = (0.5, 1000);

pub const JOB_PARSE_SYSTEM: &str = "You are an expert at parsing job descriptions and \
    extracting structured information. Return only valid JSON.";

pub const JOB_PARSE_TEMPLATE: &str = r#"Parse this job description and extract structured information.
Return a JSON object with these fields:
- title: The job title
- description: A concise summary of the role (2-3 sentences)
- requirements: Array of key requirements and qualifications
- key_responsibilities: Array of main responsibilities
- desired_skills: Array of important skills mentioned
- company_name: Company name if mentioned, otherwise null

Job Description:
{text}

Return ONLY valid JSON, no markdown formatting."#;

pub const COMPANY_PARSE_SYSTEM: &str = "You are an expert at parsing company information \
    and extracting structured details. Return only valid JSON.";

pub const COMPANY_PARSE_TEMPLATE: &str = r#"Parse this company information and extract structured details.
Return a JSON object with these fields:
- name: The ACTUAL company name mentioned in the text (e.g., "Tech Innovations Inc.", "Google", "Microsoft"). Do NOT use generic terms like "Company" or "The Company".
- about: Brief company description (2-3 sentences)
- industry: Industry/sector
- size: Company size if mentioned
- location: Location/headquarters if mentioned
- website: Website URL if mentioned
- values: Array of company values or culture points
- recent_news: Any recent achievements or news mentioned

Company Information:
{text}

IMPORTANT: Extract the EXACT company name from the text. If the company name appears anywhere (e.g., "About [Company Name]" or "[Company Name] is..."), use that exact name.
Return ONLY valid JSON, no markdown formatting."#;

pub const SUMMARY_SYSTEM: &str = "You are a professional resume writer who creates natural, \
    authentic professional summaries that align with job descriptions without inventing experience.";

pub const SUMMARY_TEMPLATE: &str = r#"Here is my current professional summary:
{summary}

Here is a job description I'm applying for:
{job_text}

Rewrite my professional summary to better align with this job description.
Keep every fact from the original summary accurate.
Do not invent skills or experience I don't have.
Keep it concise (2-3 sentences).
Make it sound natural and authentic, not overly corporate or buzzword-heavy.
Return only the rewritten summary."#;

pub const BULLETS_SYSTEM: &str = "You are a professional resume writer who creates natural, \
    human-sounding resume bullets that match job descriptions without inventing experience \
    or using excessive corporate speak.";

pub const BULLETS_TEMPLATE: &str = r#"Here are my existing resume bullets:
{bullets}

Here is a job description:
{job_text}

Rewrite only the bullets to better match terminology and priorities in the job description.
Do not invent skills or experience.
Keep each bullet about the same length as the original.
Make it sound natural and human - avoid corporate jargon overload.
Return only the bullet points, one per line, starting with a dash (-)."#;

pub const COVER_LETTER_SYSTEM: &str = "You are an experienced career coach who writes warm, \
    specific cover letters. You never invent experience, employers or skills.";

pub const COVER_LETTER_DRAFT_TEMPLATE: &str = r#"Write a cover letter for this application.

Candidate:
- Name: {name}
- Current role: {role}
- Location: {location}
- Top skills: {skills}
- Recent highlights:
{highlights}

Job:
- Title: {job_title}
- Company: {company}
- Company mission: {mission}

Guidelines:
- Open with "Dear Hiring Manager," and close with "Sincerely," followed by the candidate's name.
- Three short body paragraphs: why this role and company, the most relevant evidence from the highlights, and a forward-looking close.
- Only use facts listed above.
- Plain text only, paragraphs separated by a blank line."#;

pub const COVER_LETTER_POLISH_TEMPLATE: &str = r#"Shorten this cover letter by about 15% and sharpen the wording.
Keep the salutation, the closing and every fact. Do not add new claims.
Return only the revised letter as plain text, paragraphs separated by a blank line.

{draft}"#;

/// Fill `{key}` markers in one pass. Inserted values are never rescanned, so
/// user text containing `{company}` stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let marker = tail.find('}').and_then(|end| {
            let key = &tail[1..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });

        match marker {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn job_parse_prompt(text: &str) -> String {
    fill(JOB_PARSE_TEMPLATE, &[("text", text)])
}

pub fn company_parse_prompt(text: &str) -> String {
    fill(COMPANY_PARSE_TEMPLATE, &[("text", text)])
}

pub fn summary_prompt(summary: &str, job_text: &str) -> String {
    fill(SUMMARY_TEMPLATE, &[("summary", summary), ("job_text", job_text)])
}

pub fn bullets_prompt(bullets: &[String], job_text: &str) -> String {
    let bullets = bullets
        .iter()
        .map(|bullet| format!("- {}", bullet))
        .collect::<Vec<_>>()
        .join("\n");

    fill(BULLETS_TEMPLATE, &[("bullets", bullets.as_str()), ("job_text", job_text)])
}

pub struct CoverLetterFields<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub location: &'a str,
    pub skills: &'a str,
    pub highlights: &'a str,
    pub job_title: &'a str,
    pub company: &'a str,
    pub mission: &'a str,
}

pub fn cover_letter_draft_prompt(fields: &CoverLetterFields<'_>) -> String {
    fill(
        COVER_LETTER_DRAFT_TEMPLATE,
        &[
            ("name", fields.name),
            ("role", fields.role),
            ("location", fields.location),
            ("skills", fields.skills),
            ("highlights", fields.highlights),
            ("job_title", fields.job_title),
            ("company", fields.company),
            ("mission", fields.mission),
        ],
    )
}

pub fn cover_letter_polish_prompt(draft: &str) -> String {
    fill(COVER_LETTER_POLISH_TEMPLATE, &[("draft", draft)])
}
