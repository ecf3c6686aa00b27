use emu_window::EmuEvent;

pub fn channel() -> (Tx, Rx) {
    crossbeam_channel::bounded(100)
}
pub type Rx = crossbeam_channel::Receiver<EmuEvent>;
pub type Tx = crossbeam_channel::Sender<EmuEvent>;
