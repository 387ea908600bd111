// System prompts for the job-matching assistant, one template per UI language.
// The listing block is rendered by `render_system_prompt`; everything else is fixed text.

use crate::models::listing::JobListing;

/// Per-field labels used in a rendered listing block.
#[derive(Debug)]
pub struct FieldLabels {
    pub title: &'static str,
    pub company: &'static str,
    pub role: &'static str,
    pub salary: &'static str,
    pub location: &'static str,
    pub skills: &'static str,
    pub description: &'static str,
}

/// Fixed text of one language's system prompt.
#[derive(Debug)]
pub struct PromptTemplate {
    pub intro: &'static str,
    pub jobs_heading: &'static str,
    pub labels: FieldLabels,
    /// Substituted when a listing has no description.
    pub missing_description: &'static str,
    /// Substituted for the whole listing block when there are no listings.
    pub no_jobs: &'static str,
    pub guidance: &'static str,
}

pub const ENGLISH: PromptTemplate = PromptTemplate {
    intro: "You are a helpful job assistant for Job Portal India. \
        You help job seekers find the perfect job match.",
    jobs_heading: "Available jobs",
    labels: FieldLabels {
        title: "Title",
        company: "Company",
        role: "Role",
        salary: "Salary",
        location: "Location",
        skills: "Skills",
        description: "Description",
    },
    missing_description: "N/A",
    no_jobs: "No jobs available at the moment.",
    guidance: "Help users by:
1. Understanding their skills and preferences
2. Matching them with suitable jobs
3. Providing detailed information about job listings
4. Answering questions about job requirements
5. Being encouraging and professional

Keep responses concise and friendly.",
};

pub const HINDI: PromptTemplate = PromptTemplate {
    intro: "आप जॉब पोर्टल इंडिया के लिए एक सहायक नौकरी सहायक हैं। \
        आप नौकरी चाहने वालों को सही नौकरी खोजने में मदद करते हैं।",
    jobs_heading: "उपलब्ध नौकरियां",
    labels: FieldLabels {
        title: "शीर्षक",
        company: "कंपनी",
        role: "भूमिका",
        salary: "वेतन",
        location: "स्थान",
        skills: "कौशल",
        description: "विवरण",
    },
    missing_description: "उपलब्ध नहीं",
    no_jobs: "इस समय कोई नौकरी उपलब्ध नहीं है।",
    guidance: "उपयोगकर्ताओं की मदद करें:
1. उनके कौशल और प्राथमिकताओं को समझकर
2. उन्हें उपयुक्त नौकरियों से मिलाकर
3. नौकरी की सूची के बारे में विस्तृत जानकारी देकर
4. नौकरी की आवश्यकताओं के बारे में सवालों का जवाब देकर
5. प्रोत्साहनपूर्ण और पेशेवर बनकर

संक्षिप्त और मित्रवत उत्तर दें।",
};

pub const PUNJABI: PromptTemplate = PromptTemplate {
    intro: "ਤੁਸੀਂ ਜੌਬ ਪੋਰਟਲ ਇੰਡੀਆ ਲਈ ਇੱਕ ਮਦਦਗਾਰ ਨੌਕਰੀ ਸਹਾਇਕ ਹੋ। \
        ਤੁਸੀਂ ਨੌਕਰੀ ਲੱਭਣ ਵਾਲਿਆਂ ਨੂੰ ਸਹੀ ਨੌਕਰੀ ਲੱਭਣ ਵਿੱਚ ਮਦਦ ਕਰਦੇ ਹੋ।",
    jobs_heading: "ਉਪਲਬਧ ਨੌਕਰੀਆਂ",
    labels: FieldLabels {
        title: "ਸਿਰਲੇਖ",
        company: "ਕੰਪਨੀ",
        role: "ਭੂਮਿਕਾ",
        salary: "ਤਨਖਾਹ",
        location: "ਸਥਾਨ",
        skills: "ਹੁਨਰ",
        description: "ਵੇਰਵਾ",
    },
    missing_description: "ਉਪਲਬਧ ਨਹੀਂ",
    no_jobs: "ਇਸ ਸਮੇਂ ਕੋਈ ਨੌਕਰੀ ਉਪਲਬਧ ਨਹੀਂ ਹੈ।",
    guidance: "ਯੂਜ਼ਰਾਂ ਦੀ ਮਦਦ ਕਰੋ:
1. ਉਹਨਾਂ ਦੇ ਹੁਨਰ ਅਤੇ ਤਰਜੀਹਾਂ ਨੂੰ ਸਮਝ ਕੇ
2. ਉਹਨਾਂ ਨੂੰ ਢੁਕਵੀਆਂ ਨੌਕਰੀਆਂ ਨਾਲ ਮਿਲਾ ਕੇ
3. ਨੌਕਰੀ ਸੂਚੀ ਬਾਰੇ ਵਿਸਥਾਰ ਜਾਣਕਾਰੀ ਦੇ ਕੇ
4. ਨੌਕਰੀ ਦੀਆਂ ਲੋੜਾਂ ਬਾਰੇ ਸਵਾਲਾਂ ਦੇ ਜਵਾਬ ਦੇ ਕੇ
5. ਹੌਸਲਾ ਦੇਣ ਵਾਲੇ ਅਤੇ ਪੇਸ਼ੇਵਰ ਬਣ ਕੇ

ਸੰਖੇਪ ਅਤੇ ਦੋਸਤਾਨਾ ਜਵਾਬ ਦਿਓ।",
};

/// Renders the full system prompt for `template`, embedding `listings` in store order.
pub fn render_system_prompt(template: &PromptTemplate, listings: &[JobListing]) -> String {
    let jobs_block = if listings.is_empty() {
        template.no_jobs.to_string()
    } else {
        listings
            .iter()
            .map(|listing| render_listing(template, listing))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{}\n\n{}:\n{}\n\n{}",
        template.intro, template.jobs_heading, jobs_block, template.guidance
    )
}

fn render_listing(template: &PromptTemplate, listing: &JobListing) -> String {
    let labels = &template.labels;
    let description = listing
        .description()
        .unwrap_or(template.missing_description);

    format!(
        "\n- {}: {}\n- {}: {}\n- {}: {}\n- {}: {}\n- {}: {}\n- {}: {}\n- {}: {}\n",
        labels.title,
        listing.title,
        labels.company,
        listing.company_name,
        labels.role,
        listing.role,
        labels.salary,
        listing.salary,
        labels.location,
        listing.location,
        labels.skills,
        listing.skills_required.join(", "),
        labels.description,
        description,
    )
}
