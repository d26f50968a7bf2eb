use super::step::Step;
use crate::betting::Action;
use crate::cards::Street;
use crate::seating::Seat;
use serde::Deserialize;
use serde::Serialize;

/// The steps from the root to a node, its stable address.
///
/// Renders as the node id, e.g. `root/HJ:F/LJ:F/CO:O2.5/BTN:C/SB:F/BB:C/flop`.
/// Street transitions render as the name of the street entered. Ids depend
/// only on the steps, so replaying the same actions reproduces the same ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path(Vec<Step>);

impl Path {
    pub fn steps(&self) -> &[Step] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn last(&self) -> Option<&Step> {
        self.0.last()
    }
    /// This path extended by one step.
    pub fn with(&self, step: Step) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
    /// The path one step up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, head)) => Some(Self(head.to_vec())),
            None => None,
        }
    }
    /// The first `n` steps.
    pub fn prefix(&self, n: usize) -> Self {
        Self(self.0.iter().take(n).copied().collect())
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

impl TryFrom<&str> for Path {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut segments = s.trim().split('/');
        match segments.next() {
            Some("root") => {}
            _ => anyhow::bail!("path {} does not start at root", s),
        }
        let mut steps = Vec::<Step>::new();
        for segment in segments {
            let step = match segment {
                "flop" | "turn" | "river" => Step {
                    seat: steps
                        .last()
                        .map(|step| step.seat)
                        .ok_or_else(|| anyhow::anyhow!("{} before any action", segment))?,
                    action: Action::Advance,
                },
                _ => {
                    let (seat, symbol) = segment
                        .split_once(':')
                        .ok_or_else(|| anyhow::anyhow!("invalid step {}", segment))?;
                    Step {
                        seat: Seat::try_from(seat)?,
                        action: Action::try_from(symbol)?,
                    }
                }
            };
            steps.push(step);
        }
        Ok(Self(steps))
    }
}
impl TryFrom<String> for Path {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "root")?;
        let mut street = Street::Pref;
        for step in self.0.iter() {
            match step.action {
                Action::Advance => {
                    street = street.next().unwrap_or(street);
                    write!(f, "/{}", street.to_string().to_lowercase())?;
                }
                _ => write!(f, "/{}", step)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Seat::*;

    fn path() -> Path {
        Path::from(vec![
            Step::from((Hj, Action::Fold)),
            Step::from((Lj, Action::Fold)),
            Step::from((Co, Action::Open(250))),
            Step::from((Btn, Action::Call)),
            Step::from((Sb, Action::Fold)),
            Step::from((Bb, Action::Call)),
            Step::from((Bb, Action::Advance)),
            Step::from((Bb, Action::Check)),
        ])
    }

    #[test]
    fn renders_id() {
        assert_eq!(Path::default().to_string(), "root");
        assert_eq!(
            path().to_string(),
            "root/HJ:F/LJ:F/CO:O2.5/BTN:C/SB:F/BB:C/flop/BB:X"
        );
    }

    #[test]
    fn id_parses_back() {
        let id = path().to_string();
        assert_eq!(Path::try_from(id.as_str()).unwrap(), path());
        assert!(Path::try_from("HJ:F").is_err());
        assert!(Path::try_from("root/flop").is_err());
        assert!(Path::try_from("root/XX:F").is_err());
    }

    #[test]
    fn parents_and_prefixes() {
        let path = path();
        assert_eq!(path.parent().unwrap().len(), 7);
        assert_eq!(path.prefix(3).to_string(), "root/HJ:F/LJ:F/CO:O2.5");
        assert_eq!(Path::default().parent(), None);
    }
}
