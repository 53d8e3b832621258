//! Static portfolio content.

use crate::engine::MeterSpec;

pub const DISPLAY_NAME: &str = "ALPHA FF";
pub const HANDLE: &str = "ALPHA_FF:~$";
pub const TAGLINE: &str = "[APP_DEVELOPER]";
pub const FOOTER: &str = "Building the future, one app at a time.";

pub const BIO: &str = "SYSTEM SCAN INITIATED...\n\n\
> Subject identified as ALPHA_FF\n\
> Classification: Digital Architect\n\
> Status: ACTIVE\n\n\
Subject = entity.create(\"digital_weaver\");\n\
Subject.mind.pattern = \"non_conformist\";\n\
Subject.skills.include(\"reality_bending\");\n\n\
Entity demonstrates abnormal capability to transmute chaotic requirements into crystalline code structures. \
Dimensional analysis reveals subject exists simultaneously in user-experience plane and logic-execution realms.\n\n\
Warning: Subject known to collapse wave-functions of impossible problems into elegant solutions.\n\n\
Subject's core protocol: craft.digital.worlds(quality=maximum, scale=infinite);\n\n\
SYSTEM SCAN COMPLETE";

/// Skill meters shown once the bio scan completes
pub fn skills() -> Vec<MeterSpec> {
    vec![
        MeterSpec::new("REALITY_INTERFACE.ARCHITECT", "⌘", 90),
        MeterSpec::new("QUANTUM_DATA.MANIPULATOR", "⛨", 85),
        MeterSpec::new("POCKET_DIMENSION.ENGINEER", "⚡", 80),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Stable,
    Beta,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Stable => "STABLE",
            ProjectStatus::Beta => "BETA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub link: &'static str,
    pub code_snippet: &'static str,
    pub status: ProjectStatus,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "P7-0J3C7 4LPH4",
        description: "A feature-rich application with seamless user experience and modern design patterns.",
        tags: &["React", "Node.js", "Express"],
        link: "#",
        code_snippet: "function initialize() {\n  return new Promise((resolve) => {\n    const system = require('./core');\n    system.boot(process.env.KEY);\n    resolve(true);\n  });\n}",
        status: ProjectStatus::Active,
    },
    Project {
        title: "P7-0J3C7 B374",
        description: "A mobile application designed for performance and cross-platform compatibility.",
        tags: &["React Native", "Firebase", "Redux"],
        link: "#",
        code_snippet: "export default class AppCore extends Component {\n  constructor() {\n    super();\n    this.state = { initialized: false };\n    this.connectToAPI();\n  }\n  \n  render() { /* ... */ }\n}",
        status: ProjectStatus::Stable,
    },
    Project {
        title: "P7-0J3C7 G4MM4",
        description: "An enterprise-level web solution with advanced analytics and reporting features.",
        tags: &["Angular", "Express", "MongoDB"],
        link: "#",
        code_snippet: "async function processData(input) {\n  const results = await dataService.analyze(input);\n  return results.filter(item => {\n    return item.confidence > 0.85;\n  });\n}",
        status: ProjectStatus::Beta,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub code: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "Discord",
        url: "https://discord.gg/alphaxsigmaa",
        code: "SOCIAL://DISC.CONNECT",
    },
    SocialLink {
        name: "Telegram",
        url: "https://t.me/AlphaFF",
        code: "MSG://TG.SECURE",
    },
    SocialLink {
        name: "YouTube",
        url: "https://youtube.com/@AlphaFF",
        code: "MEDIA://YT.STREAM",
    },
];

/// `(protocol label, value)` pairs for the contact panel
pub const CONTACT_DATA: &[(&str, &str)] = &[
    ("EMAIL_PROTOCOL", "contact@alphaff.dev"),
    ("VOICE_PROTOCOL", "+1 (555) 123-4567"),
    ("GEOLOCATION", "San Francisco, CA"),
];

pub const SYSTEM_LOG: &[&str] = &[
    "> Secure channel ready",
    "> Awaiting connection parameters",
    "> All systems nominal",
];
