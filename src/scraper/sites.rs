//! Per-site extraction rules for known job boards

/// CSS selector lists tried in order for each field of a posting
#[derive(Debug, Clone, Copy)]
pub struct SiteAdapter {
    pub domain: &'static str,
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub description: &'static [&'static str],
    /// Join all `<p>` text when no description selector matches
    pub paragraph_fallback: bool,
}

const NONE: &[&str] = &[];

pub const SITE_ADAPTERS: &[SiteAdapter] = &[
    SiteAdapter {
        domain: "linkedin.com",
        title: &["h1.top-card-layout__title", "h1[class*='job'][class*='title']"],
        company: &["a.topcard__org-name-link", "span[class*='company'][class*='name']"],
        location: &["span.topcard__flavor--bullet", "span[class*='location']"],
        description: &["div.description__text", "div[class*='description']", "section[class*='job'][class*='details']"],
        paragraph_fallback: true,
    },
    SiteAdapter {
        domain: "indeed.com",
        title: &["h1[data-testid='jobsearch-JobInfoHeader-title']", "h1[class*='title']"],
        company: &[
            "span[data-testid='jobsearch-CompanyInfoWithoutHeaderImage']",
            "a[data-testid='jobsearch-CompanyInfoContainer']",
        ],
        location: NONE,
        description: &["div#jobDescriptionText", "div[class*='job'][class*='description']", "div[class*='content']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "glassdoor.com",
        title: &["div[data-test='job-title']", "h1[class*='title']"],
        company: &["div[data-test='employer-name']", "span[class*='employer']"],
        location: NONE,
        description: &["div[data-test='jobDescriptionContent']", "div[class*='description']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "monster.com",
        title: &["h1[data-testid='svx-job-header-title']", "h1"],
        company: &["span[data-testid='svx-job-header-company-name']"],
        location: NONE,
        description: &["div[data-testid='svx-job-description-content']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "dice.com",
        title: &["h1[data-cy='jobTitle']", "h1"],
        company: &["a[data-cy='companyNameLink']"],
        location: NONE,
        description: &["div[data-cy='jobDescription']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "stackoverflow.com",
        title: &["h1[class*='title']", "h1"],
        company: &["span[class*='company']"],
        location: NONE,
        description: &["div[class*='description']", "div[class*='content']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "angel.co",
        title: &["h1", "title"],
        company: NONE,
        location: NONE,
        description: &["main", "div#root", "body"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "wellfound.com",
        title: &["h1", "title"],
        company: NONE,
        location: NONE,
        description: &["main", "div#root", "body"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "lever.co",
        title: &["h2[data-qa='posting-name']", "h1", "h2"],
        company: &["div[data-qa='posting-company']"],
        location: NONE,
        description: &["div[data-qa='posting-description']", "div[class*='content']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "greenhouse.io",
        title: &["h1[data-test='job-title']", "h1"],
        company: NONE,
        location: NONE,
        description: &["div[data-test='job-description']", "div[class*='content']", "div[class*='description']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "workday.com",
        title: &["h1[data-automation-id='jobPostingHeader']", "h1"],
        company: NONE,
        location: NONE,
        description: &["div[data-automation-id='jobPostingDescription']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "bamboohr.com",
        title: &["h1", "h2[class*='title']"],
        company: NONE,
        location: NONE,
        description: &["div[class*='description']", "div[class*='content']"],
        paragraph_fallback: false,
    },
    SiteAdapter {
        domain: "smartrecruiters.com",
        title: &["h1", "div[class*='title']"],
        company: NONE,
        location: NONE,
        description: &["div[class*='description']", "div[class*='content']"],
        paragraph_fallback: false,
    },
];

/// Rules for unknown sites
pub const GENERIC_TITLE: &[&str] = &["h1", "h2", "title"];
pub const GENERIC_CONTENT: &[&str] = &[
    "main",
    "article",
    "[role=\"main\"]",
    ".content",
    ".job-description",
    ".description",
    ".post-content",
    ".entry-content",
    ".job-details",
];

/// First adapter whose domain occurs in `domain`
pub fn adapter_for(domain: &str) -> Option<&'static SiteAdapter> {
    SITE_ADAPTERS.iter().find(|adapter| domain.contains(adapter.domain))
}
