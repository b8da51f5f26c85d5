use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::citizenship::FilterState;
use super::domain::{Program, ProgramId};
use super::visibility::is_basically_visible;

/// Resolves which programs stay visible once exclusions between programs are applied.
///
/// A program is visible when it passes the basic checks and no *other* visible program lists its
/// id in `excludes_programs`. Visibility is resolved depth-first in input order on an explicit
/// work stack, so long exclusion chains do not grow the call stack, and memoized per program id
/// for the rest of the pass. Re-entering a program whose visibility is still being resolved
/// reads as not visible, which breaks exclusion cycles.
pub struct ExclusionResolver<'a> {
    programs: &'a [Program],
    filter_state: &'a FilterState,
    excluders: HashMap<ProgramId, Vec<usize>>,
    visibility: HashMap<ProgramId, bool>,
    in_progress: HashSet<ProgramId>,
}

impl<'a> ExclusionResolver<'a> {
    pub fn new(programs: &'a [Program], filter_state: &'a FilterState) -> Self {
        let mut excluders: HashMap<ProgramId, Vec<usize>> = HashMap::new();
        for (index, program) in programs.iter().enumerate() {
            for excluded in program.excluded_ids() {
                excluders.entry(*excluded).or_default().push(index);
            }
        }

        Self {
            programs,
            filter_state,
            excluders,
            visibility: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Visible programs in input order.
    pub fn resolve(mut self) -> Vec<Program> {
        let programs = self.programs;
        let visible: Vec<Program> = (0..programs.len())
            .filter(|index| self.is_visible(*index))
            .map(|index| programs[index].clone())
            .collect();

        debug!(
            candidates = programs.len(),
            visible = visible.len(),
            "resolved program exclusions"
        );

        visible
    }

    fn is_visible(&mut self, root: usize) -> bool {
        if let Some(visible) = self.settled(root) {
            return visible;
        }

        let programs = self.programs;
        self.in_progress.insert(programs[root].program_id);
        let mut stack = vec![Frame {
            index: root,
            next_excluder: 0,
        }];
        let mut last = false;
        let mut child_visible = false;

        while let Some(frame) = stack.last_mut() {
            let id = programs[frame.index].program_id;

            if std::mem::take(&mut child_visible) {
                stack.pop();
                last = self.settle(id, false);
                continue;
            }

            let position = frame.next_excluder;
            frame.next_excluder += 1;
            let Some(excluder) = self
                .excluders
                .get(&id)
                .and_then(|excluders| excluders.get(position))
                .copied()
            else {
                stack.pop();
                last = self.settle(id, true);
                child_visible = true;
                continue;
            };

            if programs[excluder].program_id == id {
                continue;
            }

            match self.settled(excluder) {
                Some(true) => {
                    stack.pop();
                    last = self.settle(id, false);
                }
                Some(false) => {}
                None => {
                    self.in_progress.insert(programs[excluder].program_id);
                    stack.push(Frame {
                        index: excluder,
                        next_excluder: 0,
                    });
                }
            }
        }

        last
    }

    /// Visibility known without walking excluders: memoized, in progress, or failing basics.
    fn settled(&mut self, index: usize) -> Option<bool> {
        let programs = self.programs;
        let program = &programs[index];
        let id = program.program_id;

        if let Some(visible) = self.visibility.get(&id) {
            return Some(*visible);
        }
        if self.in_progress.contains(&id) {
            return Some(false);
        }
        if !is_basically_visible(program, self.filter_state) {
            self.visibility.insert(id, false);
            return Some(false);
        }
        None
    }

    fn settle(&mut self, id: ProgramId, visible: bool) -> bool {
        self.in_progress.remove(&id);
        self.visibility.insert(id, visible);
        visible
    }
}

/// Pending visibility check: a program and the position of its next excluder to look at.
struct Frame {
    index: usize,
    next_excluder: usize,
}

/// Apply the exclusion graph to `programs`. The admin view returns the list unchanged.
pub fn resolve_exclusions(
    programs: &[Program],
    filter_state: &FilterState,
    is_admin_view: bool,
) -> Vec<Program> {
    if is_admin_view {
        return programs.to_vec();
    }

    ExclusionResolver::new(programs, filter_state).resolve()
}
