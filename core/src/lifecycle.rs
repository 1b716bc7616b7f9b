use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::*;

/// One stage of the top-level flow, driven by a [`Registry`].
pub trait Phase {
    /// Runs once, on the first update after the phase was inserted, right before its first step.
    fn on_enter(&mut self, ctx: &mut Context<'_>);

    /// Runs once per update while the phase is active.
    fn step(&mut self, ctx: &mut Context<'_>);

    /// Runs once, on the first update after the phase was erased.
    fn on_exit(&mut self, ctx: &mut Context<'_>);

    fn view(&self) -> View<'_> {
        View::Blank
    }
}

/// Receives the render data of every active phase once per update.
pub trait Renderer {
    fn draw(&mut self, key: &str, view: View<'_>);
}

impl Renderer for () {
    fn draw(&mut self, _key: &str, _view: View<'_>) {}
}

/// Valid transitions:
/// - PendingCreate -> Active, within the update that runs `on_enter` and the first step
/// - Active -> PendingDelete
/// - PendingCreate -> PendingDelete
/// - PendingDelete -> removed, at the end of the update that ran `on_exit`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    PendingCreate,
    Active,
    PendingDelete,
}

struct PhaseRecord {
    status: Status,
    phase: Box<dyn Phase>,
}

enum Request {
    Insert(String, Box<dyn Phase>),
    Erase(String),
}

type Requests = SmallVec<[Request; 4]>;

/// Input for a single update, sampled by the frame loop.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    pub input: &'a InputEdgeTracker,
    /// Cell under the pointer, already translated to `(column, row)`.
    pub pointer: Option<Coord2>,
}

impl<'a> Frame<'a> {
    pub fn new(input: &'a InputEdgeTracker, pointer: Option<Coord2>) -> Self {
        Self { input, pointer }
    }
}

/// What a phase can see and do during one lifecycle hook.
///
/// Inserts and erases go into a queue that the registry applies after the whole pass, so a phase
/// can replace itself without touching the collection being iterated.
pub struct Context<'a> {
    frame: Frame<'a>,
    session: &'a mut Session,
    requests: &'a mut Requests,
}

impl<'a> Context<'a> {
    fn new(frame: Frame<'a>, session: &'a mut Session, requests: &'a mut Requests) -> Self {
        Self {
            frame,
            session,
            requests,
        }
    }

    pub fn input(&self) -> &InputEdgeTracker {
        self.frame.input
    }

    pub fn pointer(&self) -> Option<Coord2> {
        self.frame.pointer
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.session
    }

    pub fn difficulties(&self) -> &DifficultyTable {
        self.session.difficulties()
    }

    pub fn insert(&mut self, key: impl Into<String>, phase: Box<dyn Phase>) {
        self.requests.push(Request::Insert(key.into(), phase));
    }

    pub fn erase(&mut self, key: impl Into<String>) {
        self.requests.push(Request::Erase(key.into()));
    }
}

/// Keyed phases with a create/active/delete lifecycle.
#[derive(Default)]
pub struct Registry {
    records: HashMap<String, PhaseRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, phase: Box<dyn Phase>) -> Result<()> {
        let key = key.into();
        if self.records.contains_key(&key) {
            return Err(Error::PhaseKeyOccupied(key));
        }
        log::debug!("phase {:?} inserted", key);
        self.records.insert(
            key,
            PhaseRecord {
                status: Status::PendingCreate,
                phase,
            },
        );
        Ok(())
    }

    /// Marks a phase for removal, it gets its `on_exit` on the next update. Missing keys are ignored.
    pub fn erase(&mut self, key: &str) {
        match self.records.get_mut(key) {
            Some(record) if record.status != Status::PendingDelete => {
                log::debug!("phase {:?} erased", key);
                record.status = Status::PendingDelete;
            }
            Some(_) => log::trace!("phase {:?} already pending delete", key),
            None => log::trace!("erase of unknown phase {:?} ignored", key),
        }
    }

    pub fn status(&self, key: &str) -> Option<Status> {
        self.records.get(key).map(|record| record.status)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs one lifecycle pass over every phase.
    ///
    /// Fails only when a phase asked to insert under a key that is still taken after the pass.
    pub fn update(
        &mut self,
        session: &mut Session,
        frame: Frame<'_>,
        renderer: &mut impl Renderer,
    ) -> Result<()> {
        let mut requests = Requests::new();
        let mut finished: SmallVec<[String; 4]> = SmallVec::new();

        for (key, record) in self.records.iter_mut() {
            let mut ctx = Context::new(frame, session, &mut requests);
            if record.status == Status::PendingDelete {
                log::debug!("phase {:?} exiting", key);
                record.phase.on_exit(&mut ctx);
                finished.push(key.clone());
                continue;
            }
            if record.status == Status::PendingCreate {
                log::debug!("phase {:?} entering", key);
                record.phase.on_enter(&mut ctx);
                record.status = Status::Active;
            }
            record.phase.step(&mut ctx);
            renderer.draw(key, record.phase.view());
        }

        for key in finished {
            self.records.remove(&key);
        }

        for request in requests {
            match request {
                Request::Insert(key, phase) => self.insert(key, phase)?,
                Request::Erase(key) => self.erase(&key),
            }
        }
        Ok(())
    }
}
