use super::SourceHandle;

// every widget on screen, in creation order
#[derive(Default)]
pub struct Registry {
    widgets: Vec<SourceHandle>,
}

impl Registry {
    pub fn add(&mut self, widget: SourceHandle) -> usize {
        self.widgets.push(widget);
        self.widgets.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&SourceHandle> {
        self.widgets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceHandle> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
