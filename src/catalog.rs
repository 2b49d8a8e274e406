//! Static content offered next to the chat
//!
//! Quick questions pre-fill the input box; the pathway catalog is a fixed
//! directory of career families and example roles.

/// A canned question shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickQuestion {
    /// Button label
    pub label: &'static str,
    /// Text placed into the input box when selected
    pub query: &'static str,
}

/// A family of related careers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathwayCategory {
    pub name: &'static str,
    pub careers: &'static [&'static str],
}

pub const QUICK_QUESTIONS: &[QuickQuestion] = &[
    QuickQuestion {
        label: "What career is best for me based on my skills?",
        query: "What career is best for someone with skills in Python, machine learning, and problem-solving?",
    },
    QuickQuestion {
        label: "How do I prepare for a career in AI/ML?",
        query: "How do I prepare for a career in AI/ML?",
    },
    QuickQuestion {
        label: "Which jobs are in demand in 2025?",
        query: "Which jobs are in demand in 2025?",
    },
    QuickQuestion {
        label: "Should I go for higher studies or a job?",
        query: "Should I go for higher studies or a job after computer science?",
    },
];

pub const CAREER_PATHWAYS: &[PathwayCategory] = &[
    PathwayCategory {
        name: "AI & Data Science",
        careers: &[
            "Data Scientist",
            "Machine Learning Engineer",
            "AI Researcher",
            "Data Analyst",
            "Business Intelligence Analyst",
        ],
    },
    PathwayCategory {
        name: "Software Development",
        careers: &[
            "Full Stack Developer",
            "Mobile App Developer",
            "Cloud Engineer",
            "DevOps Engineer",
            "QA Automation Engineer",
        ],
    },
    PathwayCategory {
        name: "Business & Management",
        careers: &[
            "Business Analyst",
            "Product Manager",
            "Strategy Consultant",
            "Project Manager",
            "Operations Manager",
        ],
    },
    PathwayCategory {
        name: "Research & Higher Studies",
        careers: &[
            "Pursue Masters/PhD in Emerging Tech",
            "Academic Researcher",
            "Think Tanks",
            "Research Scientist",
        ],
    },
];

/// Look up a quick question by its position
pub fn quick_question(index: usize) -> Option<&'static QuickQuestion> {
    QUICK_QUESTIONS.get(index)
}
