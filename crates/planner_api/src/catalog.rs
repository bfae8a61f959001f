//! Static school → major → specialization table.
//!
//! Lookups return borrowed `'static` data; the table never changes while the
//! process runs.

use std::collections::HashSet;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorEntry {
    pub name: &'static str,
    pub specializations: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolEntry {
    pub name: &'static str,
    pub majors: &'static [MajorEntry],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no schools")]
    Empty,
    #[error("school '{0}' appears more than once")]
    DuplicateSchool(&'static str),
    #[error("school '{0}' has no majors")]
    SchoolWithoutMajors(&'static str),
    #[error("major '{major}' appears more than once in '{school}'")]
    DuplicateMajor {
        school: &'static str,
        major: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    schools: &'static [SchoolEntry],
}

impl Catalog {
    pub const fn new(schools: &'static [SchoolEntry]) -> Self {
        Self { schools }
    }

    /// The UC Riverside undergraduate table.
    pub const fn ucr() -> Self {
        Self::new(UCR_SCHOOLS)
    }

    pub fn schools(&self) -> Vec<&'static str> {
        self.schools.iter().map(|school| school.name).collect()
    }

    pub fn school(&self, school: &str) -> Option<&'static SchoolEntry> {
        self.schools.iter().find(|entry| entry.name == school)
    }

    pub fn major(&self, school: &str, major: &str) -> Option<&'static MajorEntry> {
        self.school(school)?
            .majors
            .iter()
            .find(|entry| entry.name == major)
    }

    pub fn majors_for(&self, school: &str) -> Option<Vec<&'static str>> {
        self.school(school)
            .map(|entry| entry.majors.iter().map(|major| major.name).collect())
    }

    pub fn specializations_for(
        &self,
        school: &str,
        major: &str,
    ) -> Option<&'static [&'static str]> {
        self.major(school, major).map(|entry| entry.specializations)
    }

    pub fn first_school(&self) -> Option<&'static SchoolEntry> {
        self.schools.first()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.schools.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen_schools = HashSet::new();
        for school in self.schools {
            if !seen_schools.insert(school.name) {
                return Err(CatalogError::DuplicateSchool(school.name));
            }
            if school.majors.is_empty() {
                return Err(CatalogError::SchoolWithoutMajors(school.name));
            }
            let mut seen_majors = HashSet::new();
            for major in school.majors {
                if !seen_majors.insert(major.name) {
                    return Err(CatalogError::DuplicateMajor {
                        school: school.name,
                        major: major.name,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::ucr()
    }
}

const fn major(name: &'static str, specializations: &'static [&'static str]) -> MajorEntry {
    MajorEntry {
        name,
        specializations,
    }
}

const NONE: &[&str] = &[];
const ADMINISTRATIVE_STUDIES: &[&str] = &["Administrative Studies"];

const UCR_SCHOOLS: &[SchoolEntry] = &[
    SchoolEntry {
        name: "Marlan and Rosemary Bourns College of Engineering",
        majors: &[
            major("Bioengineering", NONE),
            major("Chemical Engineering", NONE),
            major("Computer Engineering", NONE),
            major("Computer Science", NONE),
            major("Computer Science and Business Applications", NONE),
            major("Data Science", NONE),
            major("Electrical Engineering", NONE),
            major("Environmental Engineering", NONE),
            major("Materials Science and Engineering", NONE),
            major("Mechanical Engineering", NONE),
            major("Robotics Engineering", NONE),
        ],
    },
    SchoolEntry {
        name: "College of Humanities, Arts, and Social Sciences",
        majors: &[
            major("African American Studies", NONE),
            major("Anthropology", NONE),
            major("Art (Studio)", NONE),
            major(
                "Art History",
                &["Administrative Studies", "Religious Studies"],
            ),
            major("Asian American Studies", NONE),
            major("Asian Studies", NONE),
            major("Business Economics", NONE),
            major("Chicano Studies", NONE),
            major("Creative Writing", NONE),
            major("Dance", NONE),
            major("Economics", ADMINISTRATIVE_STUDIES),
            major("English", NONE),
            major("Ethnic Studies", NONE),
            major("Gender and Sexuality Studies", NONE),
            major("Global Studies", NONE),
            major("History", ADMINISTRATIVE_STUDIES),
            major(
                "Languages and Literatures",
                &[
                    "Chinese",
                    "Classical Studies",
                    "Comparative Ancient Civilizations",
                    "Comparative Literature",
                    "French",
                    "Germanic Studies",
                    "Japanese",
                    "Russian Studies",
                ],
            ),
            major("Latin American Studies", NONE),
            major("Liberal Studies", NONE),
            major("Linguistics", NONE),
            major("Media and Cultural Studies", NONE),
            major("Middle East and Islamic Studies", NONE),
            major("Music", &["Music and Culture"]),
            major("Native American Studies", NONE),
            major("Neuroscience", NONE),
            major("Philosophy", NONE),
            major(
                "Political Science",
                &[
                    "Administrative Studies",
                    "International Affairs",
                    "Public Service",
                ],
            ),
            major("Psychology", NONE),
            major("Religious Studies", NONE),
            major("Sociology", ADMINISTRATIVE_STUDIES),
            major("Spanish", NONE),
            major("Sustainability Studies", NONE),
            major("Theatre, Film and Digital Production", NONE),
        ],
    },
    SchoolEntry {
        name: "College of Natural and Agricultural Sciences",
        majors: &[
            major("Biochemistry", NONE),
            major("Biology", NONE),
            major("Cell, Molecular, and Developmental Biology", NONE),
            major("Chemistry", NONE),
            major("Data Science", NONE),
            major("Earth Sciences", NONE),
            major("Entomology", NONE),
            major("Environmental Sciences", NONE),
            major("Geology", NONE),
            major("Geophysics", NONE),
            major(
                "Mathematics",
                &["Mathematics for Secondary School Teachers"],
            ),
            major("Microbiology", NONE),
            major("Neuroscience", NONE),
            major("Physics", NONE),
            major("Plant Biology", NONE),
            major("Statistics", NONE),
        ],
    },
    SchoolEntry {
        name: "School of Education",
        majors: &[major(
            "Education, Society, and Human Development",
            &[
                "Community Leadership, Policy, and Social Justice",
                "Learning and Behavioral Studies",
                "Student-Designed Comparative Concentration",
            ],
        )],
    },
    SchoolEntry {
        name: "School of Business",
        majors: &[
            major("Actuarial Science", NONE),
            major(
                "Business Administration",
                &[
                    "Accounting and Auditing",
                    "Business Analytics",
                    "Finance",
                    "Information Systems",
                    "Management",
                    "Marketing",
                    "Operations and Supply Chain Management",
                ],
            ),
        ],
    },
    SchoolEntry {
        name: "School of Public Policy",
        majors: &[major(
            "Public Policy",
            &[
                "Economic Policy",
                "Health/Population Policy",
                "International/Foreign Policy",
                "Policy Institutions and Processes",
                "Social/Cultural/Family Policy",
                "Urban/Environmental Policy",
            ],
        )],
    },
    // Minors and cross-listed specializations, grouped like a school.
    SchoolEntry {
        name: "Additional Minors and Specializations",
        majors: &[
            major("Applied Statistics", NONE),
            major("Global Climate Change", NONE),
            major("International Relations", NONE),
            major("Journalism", NONE),
            major("Labor Studies", NONE),
            major(
                "Languages and Literatures",
                &["Arabic", "Italian", "Korean", "Southeast Asian"],
            ),
            major("Law and Society", NONE),
            major(
                "Lesbian, Gay, Bisexual, Intersex, and Transgender Studies",
                NONE,
            ),
            major("Marxist Studies", NONE),
            major("Peace and Conflict", NONE),
            major("Science Fiction and Technoculture Studies", NONE),
            major("Southeast Asian Studies", NONE),
            major("Urban Studies", NONE),
            major("Western American Studies", NONE),
        ],
    },
];

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
