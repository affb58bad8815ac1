use crate::dir::Dir;
use crate::pos::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view for renderers: body head first, plus the food cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_size: i32,
    pub body: Vec<Cell>,
    pub food: Cell,
    pub heading: Dir,
}

impl fmt::Display for Snapshot {
    /// Text board: `@` head, `o` body, `*` food, `.` empty. Cells off the
    /// board are not drawn.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.grid_size.max(0) as usize;
        let mut rows = vec![vec!['.'; n]; n];
        let mut put = |c: Cell, ch: char| {
            if (0..self.grid_size).contains(&c.col) && (0..self.grid_size).contains(&c.row) {
                rows[c.row as usize][c.col as usize] = ch;
            }
        };
        put(self.food, '*');
        for &c in self.body.iter().skip(1) {
            put(c, 'o');
        }
        if let Some(&head) = self.body.first() {
            put(head, '@');
        }
        for row in rows {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let s = Snapshot {
            grid_size: 3,
            body: vec![Cell::new(1, 1), Cell::new(0, 1), Cell::new(-1, 1)],
            food: Cell::new(2, 0),
            heading: Dir::East,
        };
        assert_eq!(s.to_string(), "..*\no@.\n...\n");
    }

    #[test]
    fn test_json_shape() {
        let s = Snapshot { grid_size: 4, body: vec![Cell::new(1, 2)], food: Cell::new(0, 0), heading: Dir::West };
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert_eq!(v["body"][0]["col"], 1);
        assert_eq!(v["heading"], "West");
    }
}
