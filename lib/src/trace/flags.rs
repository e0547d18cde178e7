use bitflags::bitflags;

bitflags! {
    /// Markers the evaluator records on an instruction evaluation
    #[derive(Default)]
    pub struct EvaluationFlags: u8 {
        /// Instruction/context pair seen before, so evaluation of the branch stops
        const SKIP = 0x01;

        /// Tracked values were widened instead of being tracked precisely
        const GENERALIZATION = 0x02;
    }
}

impl EvaluationFlags {
    /// Short marker for listings (eg. `S`, `G`, `SG`)
    pub fn marker(&self) -> &'static str {
        match (self.contains(Self::SKIP), self.contains(Self::GENERALIZATION)) {
            (false, false) => "",
            (true, false) => "S",
            (false, true) => "G",
            (true, true) => "SG",
        }
    }
}
