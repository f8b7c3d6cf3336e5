use crate::types::DelayRange;

pub fn text_delay() -> DelayRange {
    DelayRange::new(10, 30)
}

pub fn link_delay() -> DelayRange {
    DelayRange::new(20, 70)
}
