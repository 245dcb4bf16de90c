use glam::{ivec2, IVec2};

pub trait StrExt {
    /// Convert identifiers to lowercase kebab-case. Adds hyphens between
    /// connected lowercase and uppercase characters for CamelCase
    /// identifiers.
    fn to_kebab_case(&self) -> String;

    /// Get the smallest common indentation depth of nonempty lines of text.
    ///
    /// Both tabs and spaces are treated as a single unit of indentation.
    fn indentation(&self) -> usize;

    /// Return non-whitespace chars from a block of text mapped to their
    /// coordinates.
    ///
    /// The text is trimmed so that the result set will have a minimum x
    /// coordinate and a minimum y coordinate at 0.
    ///
    /// ```
    /// # use glam::ivec2;
    /// # use util::StrExt;
    /// let cells: Vec<_> = "
    ///     #.
    ///      #".char_grid().collect();
    /// assert_eq!(cells, vec![
    ///     (ivec2(0, 0), '#'),
    ///     (ivec2(1, 0), '.'),
    ///     (ivec2(1, 1), '#'),
    /// ]);
    /// ```
    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_;
}

impl StrExt for str {
    fn to_kebab_case(&self) -> String {
        let mut result = String::with_capacity(self.len());
        let mut prev = '_';
        for c in self.chars() {
            match c {
                '_' => result.push('-'),
                c if c.is_uppercase() && prev.is_lowercase() => {
                    result.push('-');
                    result.push(c.to_ascii_lowercase());
                }
                c => result.push(c.to_ascii_lowercase()),
            }
            prev = c;
        }

        result
    }

    fn indentation(&self) -> usize {
        self.lines()
            .filter(|a| !a.trim().is_empty())
            .map(|a| a.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0)
    }

    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        let x_skip = self.indentation();

        self.lines()
            .skip_while(|a| a.trim().is_empty())
            .enumerate()
            .flat_map(move |(y, line)| {
                line.chars()
                    .skip(x_skip)
                    .enumerate()
                    .filter(|(_, c)| !c.is_whitespace())
                    .map(move |(x, c)| (ivec2(x as i32, y as i32), c))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab() {
        assert_eq!("IS_ENTRY".to_kebab_case(), "is-entry");
        assert_eq!("RoomRecipe".to_kebab_case(), "room-recipe");
        assert_eq!("npc".to_kebab_case(), "npc");
    }

    #[test]
    fn indented_grid() {
        let text = "

            ~~~
              ~";
        assert_eq!(text.indentation(), 12);
        let cells: Vec<_> = text.char_grid().map(|(p, _)| p).collect();
        assert_eq!(cells, vec![ivec2(0, 0), ivec2(1, 0), ivec2(2, 0), ivec2(2, 1)]);
    }
}
