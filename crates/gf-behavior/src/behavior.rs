//! `Behavior` — a named logic unit attached to one game object.

use gf_core::{Decl, ObjectId};
use gf_pool::{Pool, PoolTag, PoolVariant, Poolable};
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::{BehaviorContext, ContactDamage, DeathBurst, Drift, Emitter, Lifetime};

/// Pool of recycled behaviors, one free list per [`BehaviorTag`].
pub type BehaviorPool = Pool<Behavior>;

// ── Tag ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorTag {
    Drift,
    Lifetime,
    ContactDamage,
    DeathBurst,
    Emitter,
}

impl PoolTag for BehaviorTag {
    const ALL: &'static [Self] = Self::VARIANTS;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        self.into()
    }
}

// ── Kind ──────────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub enum BehaviorKind {
    Drift(Drift),
    Lifetime(Lifetime),
    ContactDamage(ContactDamage),
    DeathBurst(DeathBurst),
    Emitter(Emitter),
}

impl BehaviorKind {
    fn fresh(tag: BehaviorTag) -> Self {
        match tag {
            BehaviorTag::Drift => BehaviorKind::Drift(Drift::default()),
            BehaviorTag::Lifetime => BehaviorKind::Lifetime(Lifetime::default()),
            BehaviorTag::ContactDamage => BehaviorKind::ContactDamage(ContactDamage::default()),
            BehaviorTag::DeathBurst => BehaviorKind::DeathBurst(DeathBurst::default()),
            BehaviorTag::Emitter => BehaviorKind::Emitter(Emitter::default()),
        }
    }

    pub fn tag(&self) -> BehaviorTag {
        match self {
            BehaviorKind::Drift(_) => BehaviorTag::Drift,
            BehaviorKind::Lifetime(_) => BehaviorTag::Lifetime,
            BehaviorKind::ContactDamage(_) => BehaviorTag::ContactDamage,
            BehaviorKind::DeathBurst(_) => BehaviorTag::DeathBurst,
            BehaviorKind::Emitter(_) => BehaviorTag::Emitter,
        }
    }
}

/// Typed payload access, mirroring `gf_action::ActionVariant`.
pub trait BehaviorVariant: PoolVariant<Behavior> + Sized {
    fn payload(kind: &BehaviorKind) -> Option<&Self>;
    fn payload_mut(kind: &mut BehaviorKind) -> Option<&mut Self>;
}

macro_rules! behavior_variants {
    ($($variant:ident),* $(,)?) => {$(
        impl PoolVariant<Behavior> for $variant {
            const TAG: BehaviorTag = BehaviorTag::$variant;
        }

        impl BehaviorVariant for $variant {
            #[inline]
            fn payload(kind: &BehaviorKind) -> Option<&Self> {
                match kind {
                    BehaviorKind::$variant(p) => Some(p),
                    _ => None,
                }
            }

            #[inline]
            fn payload_mut(kind: &mut BehaviorKind) -> Option<&mut Self> {
                match kind {
                    BehaviorKind::$variant(p) => Some(p),
                    _ => None,
                }
            }
        }
    )*};
}

behavior_variants!(Drift, Lifetime, ContactDamage, DeathBurst, Emitter);

// ── State ─────────────────────────────────────────────────────────────────────

/// Fields every behavior has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorState {
    name:      String,
    active:    bool,
    paused:    bool,
    destroyed: bool,
    /// Stamped by `BehaviorComponent::add_behavior`.
    owner:     Option<ObjectId>,
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self { name: String::new(), active: true, paused: false, destroyed: false, owner: None }
    }
}

impl BehaviorState {
    fn reset(&mut self) {
        self.name.clear();
        self.active = true;
        self.paused = false;
        self.destroyed = false;
        self.owner = None;
    }

    fn runnable(&self) -> bool {
        self.active && !self.paused && !self.destroyed
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// One piece of attached logic.
///
/// Lifecycle: draw from a [`BehaviorPool`] → `deserialize` / configure →
/// `BehaviorComponent::add_behavior` → `initialize` → `post_initialize` →
/// `update` every frame while active and not paused → `destroy`.
#[derive(Debug, PartialEq)]
pub struct Behavior {
    state: BehaviorState,
    kind:  BehaviorKind,
}

impl Behavior {
    pub fn new(tag: BehaviorTag) -> Self {
        Self { state: BehaviorState::default(), kind: BehaviorKind::fresh(tag) }
    }

    /// Draw a `V` from `pool`, name it, and configure its payload.
    pub fn draw<V: BehaviorVariant>(
        pool:      &mut BehaviorPool,
        name:      &str,
        configure: impl FnOnce(&mut V),
    ) -> Self {
        let mut behavior = pool.get::<V>();
        behavior.state.name.push_str(name);
        if let Some(payload) = V::payload_mut(&mut behavior.kind) {
            configure(payload);
        }
        behavior
    }

    /// Build a behavior from a declarative node.  `None`, with a warning,
    /// when `"kind"` is missing or unknown.
    pub fn from_decl(decl: Decl<'_>, pool: &mut BehaviorPool) -> Option<Self> {
        let Some(kind) = decl.kind() else {
            tracing::warn!("behavior node without a kind; skipped");
            return None;
        };
        let Ok(tag) = kind.parse::<BehaviorTag>() else {
            tracing::warn!(kind, "unknown behavior kind; skipped");
            return None;
        };
        let mut behavior = pool.get_kind(tag);
        behavior.deserialize(decl);
        Some(behavior)
    }

    /// Populate configuration from `decl`.  `"name"` defaults to the kind
    /// name and `"active"` to `true`.  Never fails.
    pub fn deserialize(&mut self, decl: Decl<'_>) {
        let tag = self.tag();
        self.state.name.clear();
        self.state.name.push_str(decl.str_or("name", tag.name()));
        self.state.active = decl.bool_or("active", true);
        match &mut self.kind {
            BehaviorKind::Drift(b) => b.deserialize(decl),
            BehaviorKind::Lifetime(b) => b.deserialize(decl),
            BehaviorKind::ContactDamage(b) => b.deserialize(decl),
            BehaviorKind::DeathBurst(b) => b.deserialize(decl),
            BehaviorKind::Emitter(b) => b.deserialize(decl),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Subscribe to owner events and reset per-run state.
    pub fn initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        let Some(owner) = self.live_owner() else { return };
        match &mut self.kind {
            BehaviorKind::ContactDamage(b) => b.initialize(owner, ctx),
            BehaviorKind::DeathBurst(b) => b.initialize(owner, ctx),
            BehaviorKind::Emitter(b) => b.initialize(ctx),
            BehaviorKind::Drift(_) | BehaviorKind::Lifetime(_) => {}
        }
    }

    /// Runs once every sibling has been initialized.
    pub fn post_initialize(&mut self, ctx: &mut BehaviorContext<'_>) {
        let Some(owner) = self.live_owner() else { return };
        if let BehaviorKind::Lifetime(b) = &mut self.kind {
            b.post_initialize(owner, ctx);
        }
    }

    /// One frame of logic.  No-op unless active, not paused, and not
    /// destroyed.
    pub fn update(&mut self, ctx: &mut BehaviorContext<'_>) {
        if !self.state.runnable() {
            return;
        }
        let Some(owner) = self.state.owner else { return };
        match &mut self.kind {
            BehaviorKind::Drift(b) => b.update(owner, ctx),
            BehaviorKind::ContactDamage(b) => b.update(owner, ctx),
            BehaviorKind::DeathBurst(b) => b.update(owner, ctx),
            BehaviorKind::Emitter(b) => b.update(owner, ctx),
            BehaviorKind::Lifetime(_) => {}
        }
    }

    /// Revoke every event subscription and mark destroyed.  Idempotent.
    pub fn destroy(&mut self) {
        if self.state.destroyed {
            return;
        }
        match &mut self.kind {
            BehaviorKind::ContactDamage(b) => b.unsubscribe(),
            BehaviorKind::DeathBurst(b) => b.unsubscribe(),
            BehaviorKind::Drift(_) | BehaviorKind::Lifetime(_) | BehaviorKind::Emitter(_) => {}
        }
        self.state.destroyed = true;
        tracing::debug!(name = %self.state.name, owner = ?self.state.owner, "behavior destroyed");
    }

    fn live_owner(&self) -> Option<ObjectId> {
        if self.state.destroyed { None } else { self.state.owner }
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    pub fn set_active(&mut self, active: bool) {
        self.state.active = active;
    }

    pub(crate) fn set_owner(&mut self, owner: ObjectId) {
        self.state.owner = Some(owner);
    }

    /// Rename before the behavior is added to a component.
    pub fn set_name(&mut self, name: &str) {
        self.state.name.clear();
        self.state.name.push_str(name);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[inline]
    pub fn tag(&self) -> BehaviorTag {
        self.kind.tag()
    }

    pub fn kind(&self) -> &BehaviorKind {
        &self.kind
    }

    pub fn payload<V: BehaviorVariant>(&self) -> Option<&V> {
        V::payload(&self.kind)
    }

    pub fn payload_mut<V: BehaviorVariant>(&mut self) -> Option<&mut V> {
        V::payload_mut(&mut self.kind)
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed
    }

    pub fn owner(&self) -> Option<ObjectId> {
        self.state.owner
    }
}

// ── Pool integration ──────────────────────────────────────────────────────────

impl Poolable for Behavior {
    type Tag = BehaviorTag;

    fn construct(tag: BehaviorTag) -> Self {
        Behavior::new(tag)
    }

    fn tag(&self) -> BehaviorTag {
        self.kind.tag()
    }

    fn reallocate(&mut self, _pool: &mut BehaviorPool) {
        self.state.reset();
        match &mut self.kind {
            BehaviorKind::Drift(b) => *b = Drift::default(),
            BehaviorKind::Lifetime(b) => *b = Lifetime::default(),
            BehaviorKind::ContactDamage(b) => b.reset(),
            BehaviorKind::DeathBurst(b) => b.reset(),
            BehaviorKind::Emitter(b) => b.reset(),
        }
    }

    fn copy_config(&self, dst: &mut Self, _pool: &mut BehaviorPool) {
        dst.state.name.clone_from(&self.state.name);
        dst.state.active = self.state.active;
        match (&self.kind, &mut dst.kind) {
            (BehaviorKind::Drift(s), BehaviorKind::Drift(d)) => s.copy_config(d),
            (BehaviorKind::Lifetime(s), BehaviorKind::Lifetime(d)) => s.copy_config(d),
            (BehaviorKind::ContactDamage(s), BehaviorKind::ContactDamage(d)) => s.copy_config(d),
            (BehaviorKind::DeathBurst(s), BehaviorKind::DeathBurst(d)) => s.copy_config(d),
            (BehaviorKind::Emitter(s), BehaviorKind::Emitter(d)) => s.copy_config(d),
            (src, dst) => unreachable!(
                "copy_config: {} into {} passed the pool's variant check",
                src.tag().name(),
                dst.tag().name(),
            ),
        }
    }
}
