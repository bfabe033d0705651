use ahbsim_core::regfile::{RegisterId, RegisterStorage};
use mockall::mock;

mock! {
    pub Storage {}

    impl RegisterStorage for Storage {
        fn read(&self, reg: RegisterId) -> u32;
        fn write(&mut self, reg: RegisterId, value: u32);
        fn reset(&mut self);
    }
}
