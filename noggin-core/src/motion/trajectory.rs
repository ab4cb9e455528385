//! Stepwise interpolation between two head positions

/// Iterator over intermediate `(pan, tilt)` positions
///
/// Each axis advances toward its target by at most `step` degrees per
/// item. The final item is always exactly the target, even when the
/// distance is not a multiple of the step. An empty move yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trajectory {
    current: (i16, i16),
    target: (i16, i16),
    step: i16,
}

impl Trajectory {
    /// Plan a move from `from` to `to`
    ///
    /// `step` below one degree is raised to one.
    pub fn new(from: (i16, i16), to: (i16, i16), step: i16) -> Self {
        Self {
            current: from,
            target: to,
            step: step.max(1),
        }
    }

    /// Number of positions still to be yielded
    pub fn remaining(&self) -> usize {
        let steps = |from: i16, to: i16| {
            let distance = (i32::from(to) - i32::from(from)).unsigned_abs() as usize;
            distance.div_ceil(self.step as usize)
        };
        steps(self.current.0, self.target.0).max(steps(self.current.1, self.target.1))
    }
}

fn step_toward(from: i16, to: i16, step: i16) -> i16 {
    if from < to {
        from.saturating_add(step).min(to)
    } else if from > to {
        from.saturating_sub(step).max(to)
    } else {
        from
    }
}

impl Iterator for Trajectory {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.target {
            return None;
        }

        self.current = (
            step_toward(self.current.0, self.target.0, self.step),
            step_toward(self.current.1, self.target.1, self.step),
        );
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trajectory {}
