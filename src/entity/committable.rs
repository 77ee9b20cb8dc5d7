use super::Entity;

/// Anything that can hand its entities to `Commit::commit`.
pub trait Committable {
    fn entities_mut(&mut self) -> Vec<&mut Entity>;
}

impl Committable for Entity {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        vec![self]
    }
}

impl<'a> Committable for [&'a mut Entity] {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        self.iter_mut().map(|e| &mut **e).collect()
    }
}

impl<'a, const N: usize> Committable for [&'a mut Entity; N] {
    fn entities_mut(&mut self) -> Vec<&mut Entity> {
        self.iter_mut().map(|e| &mut **e).collect()
    }
}
