//! Tests against the real FMOD Studio library, without authored banks.

use serial_test::serial;

use fmodex::enums::OutputType;
use fmodex::flags::{InitFlags, LoadBankFlags, StudioInitFlags};
use fmodex::studio::StudioSystem;
use fmodex::{ffi, Attributes3d, Error, Guid, Vector};

fn studio() -> Option<StudioSystem> {
    if let Err(e) = ffi::studio_api() {
        eprintln!("Skipping: FMOD Studio library not available ({})", e);
        return None;
    }
    let studio = StudioSystem::new().expect("studio system");
    studio
        .core_system()
        .unwrap()
        .set_output(OutputType::NoSoundNrt)
        .unwrap();
    studio
        .initialize(32, StudioInitFlags::NORMAL, InitFlags::NORMAL)
        .unwrap();
    Some(studio)
}

#[test]
#[serial]
fn test_listeners() {
    let Some(studio) = studio() else { return };
    assert_eq!(studio.num_listeners().unwrap(), 1);
    studio.set_num_listeners(2).unwrap();
    assert_eq!(studio.num_listeners().unwrap(), 2);

    let attributes = Attributes3d::at(Vector::new(1.0, 2.0, 3.0));
    studio.set_listener_attributes(1, &attributes, None).unwrap();
    studio.update().unwrap();
    let (read, _attenuation) = studio.listener_attributes(1).unwrap();
    assert_eq!(read.position, attributes.position);

    assert!(matches!(studio.set_num_listeners(0), Err(Error::InvalidArgument(_))));
    studio.release().unwrap();
}

#[test]
#[serial]
fn test_no_banks_loaded() {
    let Some(studio) = studio() else { return };
    assert_eq!(studio.bank_count().unwrap(), 0);
    assert!(studio.bank_list().unwrap().is_empty());
    assert!(studio.parameter_description_list().unwrap().is_empty());

    let err = studio.event("event:/Does/Not/Exist").unwrap_err();
    assert!(err.code().is_some(), "{}", err);
    assert!(studio.lookup_path(&Guid::default()).is_err());
    studio.release().unwrap();
}

#[test]
#[serial]
fn test_load_bank_memory_rejects_garbage() {
    let Some(studio) = studio() else { return };
    assert!(matches!(
        studio.load_bank_memory(&[], LoadBankFlags::NORMAL),
        Err(Error::InvalidArgument(_))
    ));
    let err = studio
        .load_bank_memory(b"RIFF\0\0\0\0not a bank", LoadBankFlags::NORMAL)
        .unwrap_err();
    assert!(err.code().is_some(), "{}", err);
    studio.flush_commands().unwrap();
    assert_eq!(studio.bank_count().unwrap(), 0);
    studio.unload_all().unwrap();
    studio.release().unwrap();
}
