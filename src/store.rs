/// In-memory project and crew collections with id-indexed crew lookup.
use std::collections::HashMap;

use anyhow::{Result, bail};
use log::info;
use rand::RngExt;

use crate::color;
use crate::config::FALLBACK_COLOR;
use crate::types::{Crew, CrewId, Member, Project};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Generates a short random base-36 identifier.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// The three crews a fresh board starts with.
pub fn default_crews() -> Vec<Crew> {
    fn crew(id: &str, name: &str, color: &str, members: &[&str]) -> Crew {
        Crew {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            members: members
                .iter()
                .enumerate()
                .map(|(index, name)| Member {
                    name: name.to_string(),
                    is_leader: index == 0,
                })
                .collect(),
        }
    }

    vec![
        crew("1", "Alpha Crew", "#3b82f6", &["John Smith", "Mike Johnson"]),
        crew("2", "Beta Crew", "#22c55e", &["Sarah Davis", "Tom Wilson"]),
        crew("3", "Gamma Crew", "#f59e0b", &["Chris Brown"]),
    ]
}

impl Crew {
    pub fn leader(&self) -> Option<&Member> {
        self.members.iter().find(|member| member.is_leader)
    }

    pub fn add_member(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("member name cannot be empty");
        }
        self.members.push(Member {
            name: name.to_string(),
            is_leader: false,
        });
        Ok(())
    }

    /// Makes the member at `index` the only leader. Out-of-range indexes are
    /// rejected and leave the members untouched.
    pub fn set_leader(&mut self, index: usize) -> Result<()> {
        if index >= self.members.len() {
            bail!(
                "crew '{}' has no member #{index} ({} members)",
                self.name,
                self.members.len()
            );
        }
        for (i, member) in self.members.iter_mut().enumerate() {
            member.is_leader = i == index;
        }
        Ok(())
    }

    /// Removes the member at `index`. Removing the leader leaves the crew
    /// without one; nobody is promoted.
    pub fn remove_member(&mut self, index: usize) -> Result<Member> {
        if index >= self.members.len() {
            bail!(
                "crew '{}' has no member #{index} ({} members)",
                self.name,
                self.members.len()
            );
        }
        Ok(self.members.remove(index))
    }
}

/// Owner of the board's projects and crews.
#[derive(Clone, Debug, Default)]
pub struct Store {
    projects: Vec<Project>,
    crews: Vec<Crew>,
    crew_index: HashMap<CrewId, usize>,
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.projects == other.projects && self.crews == other.crews
    }
}

impl Store {
    pub fn new(projects: Vec<Project>, crews: Vec<Crew>) -> Self {
        let mut store = Self {
            projects,
            crews,
            crew_index: HashMap::new(),
        };
        store.reindex_crews();
        store
    }

    /// An empty board with the default crews.
    pub fn seeded() -> Self {
        Self::new(Vec::new(), default_crews())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn crews(&self) -> &[Crew] {
        &self.crews
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn crew(&self, id: &str) -> Option<&Crew> {
        self.crew_index.get(id).and_then(|&index| self.crews.get(index))
    }

    pub fn crew_for(&self, project: &Project) -> Option<&Crew> {
        project.crew().and_then(|id| self.crew(id))
    }

    /// Display colour for a crew reference; unassigned and dangling
    /// references get [`FALLBACK_COLOR`].
    pub fn crew_color(&self, crew_id: Option<&str>) -> &str {
        crew_id
            .filter(|id| !id.is_empty())
            .and_then(|id| self.crew(id))
            .map(|crew| crew.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn project_color(&self, project: &Project) -> &str {
        self.crew_color(project.crew())
    }

    /// Replaces the project with the same id in place, or appends it.
    /// Returns `true` when the project is new.
    pub fn upsert_project(&mut self, project: Project) -> bool {
        if let Some(existing) = self.projects.iter_mut().find(|p| p.id == project.id) {
            info!("event=project_updated id={}", project.id);
            *existing = project;
            false
        } else {
            info!("event=project_created id={}", project.id);
            self.projects.push(project);
            true
        }
    }

    pub fn delete_project(&mut self, id: &str) -> Option<Project> {
        let index = self.projects.iter().position(|project| project.id == id)?;
        info!("event=project_deleted id={id}");
        Some(self.projects.remove(index))
    }

    pub fn add_crew(&mut self, crew: Crew) -> Result<()> {
        if self.crew_index.contains_key(&crew.id) {
            bail!("crew id '{}' already exists", crew.id);
        }
        info!("event=crew_created id={}", crew.id);
        self.crews.push(crew);
        self.reindex_crews();
        Ok(())
    }

    /// Appends a fresh, memberless crew with a random colour.
    pub fn new_crew(&mut self, name: Option<&str>) -> Result<&Crew> {
        let crew = Crew {
            id: generate_id(),
            name: name.unwrap_or("New Crew").to_string(),
            color: color::random_color(),
            members: Vec::new(),
        };
        let id = crew.id.clone();
        self.add_crew(crew)?;
        match self.crew(&id) {
            Some(crew) => Ok(crew),
            None => bail!("crew '{id}' missing after insert"),
        }
    }

    pub fn update_crew(&mut self, id: &str, name: Option<&str>, color: Option<&str>) -> Result<()> {
        if let Some(color) = color.filter(|c| !color::is_valid_hex(c)) {
            bail!("invalid color '{color}', expected #RRGGBB");
        }
        let crew = self.crew_mut(id)?;
        if let Some(name) = name {
            crew.name = name.to_string();
        }
        if let Some(color) = color {
            crew.color = color.to_string();
        }
        info!("event=crew_updated id={id}");
        Ok(())
    }

    /// Removes a crew. Projects that reference it keep their now dangling
    /// `crew_id`.
    pub fn delete_crew(&mut self, id: &str) -> Option<Crew> {
        let index = *self.crew_index.get(id)?;
        let crew = self.crews.remove(index);
        self.reindex_crews();
        info!("event=crew_deleted id={id}");
        Some(crew)
    }

    /// Appends a member to the crew with id `crew_id`.
    pub fn add_member(&mut self, crew_id: &str, name: &str) -> Result<()> {
        self.crew_mut(crew_id)?.add_member(name)?;
        info!("event=member_added crew={crew_id}");
        Ok(())
    }

    pub fn remove_member(&mut self, crew_id: &str, index: usize) -> Result<Member> {
        let member = self.crew_mut(crew_id)?.remove_member(index)?;
        info!("event=member_removed crew={crew_id} index={index}");
        Ok(member)
    }

    /// Makes the member at `index` the crew's only leader and returns it.
    pub fn set_leader(&mut self, crew_id: &str, index: usize) -> Result<&Member> {
        let crew = self.crew_mut(crew_id)?;
        crew.set_leader(index)?;
        info!("event=leader_set crew={crew_id} index={index}");
        Ok(&crew.members[index])
    }

    // `crew_index` is keyed by `Crew::id`; keep `&mut Crew` inside the store.
    fn crew_mut(&mut self, id: &str) -> Result<&mut Crew> {
        match self.crew_index.get(id).copied() {
            Some(index) => Ok(&mut self.crews[index]),
            None => bail!("crew '{id}' not found"),
        }
    }

    fn reindex_crews(&mut self) {
        self.crew_index = self
            .crews
            .iter()
            .enumerate()
            .map(|(index, crew)| (crew.id.clone(), index))
            .collect();
    }
}
