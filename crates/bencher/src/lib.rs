#[cfg(feature = "codspeed")]
pub use codspeed_criterion_compat as criterion;
#[cfg(not(feature = "codspeed"))]
pub use criterion;

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    event: TestEvent,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, event: TestEvent) -> Self {
        Self { name, group, event }
    }

    pub fn small(name: &'static str, event: TestEvent) -> Self {
        Self::new(name, TestGroup::Small, event)
    }

    pub fn normal(name: &'static str, event: TestEvent) -> Self {
        Self::new(name, TestGroup::Normal, event)
    }

    pub fn large(name: &'static str, event: TestEvent) -> Self {
        Self::new(name, TestGroup::Large, event)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn event(&self) -> &TestEvent {
        &self.event
    }

    pub fn file_name(&self) -> &'static str {
        self.event().file_name
    }
}

/// A JSON request event loaded at compile time.
#[derive(Debug, Copy, Clone)]
pub struct TestEvent {
    file_name: &'static str,
    content: &'static str,
}

impl TestEvent {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

/// Size of the route table a case is measured against.
#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

impl TestGroup {
    pub fn route_count(&self) -> usize {
        match self {
            TestGroup::Small => 4,
            TestGroup::Normal => 32,
            TestGroup::Large => 256,
        }
    }
}
