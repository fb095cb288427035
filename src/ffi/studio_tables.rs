//! Function tables for the FMOD Studio API.

use libc::{c_char, c_float, c_int, c_uint, c_void};
use libloading::Library;

use super::library::{resolve, Func};
use super::*;

function_table! {
    pub struct StudioSystemFns {
        create = "Create": fn(*mut *mut FMOD_STUDIO_SYSTEM, c_uint);
        initialize = "Initialize": fn(
            *mut FMOD_STUDIO_SYSTEM, c_int, FMOD_STUDIO_INITFLAGS, FMOD_INITFLAGS, *mut c_void
        );
        release = "Release": fn(*mut FMOD_STUDIO_SYSTEM);
        update = "Update": fn(*mut FMOD_STUDIO_SYSTEM);
        flush_commands = "FlushCommands": fn(*mut FMOD_STUDIO_SYSTEM);
        flush_sample_loading = "FlushSampleLoading": fn(*mut FMOD_STUDIO_SYSTEM);
        get_core_system = "GetCoreSystem": fn(*mut FMOD_STUDIO_SYSTEM, *mut *mut FMOD_SYSTEM);
        get_event = "GetEvent":
            fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut *mut FMOD_STUDIO_EVENTDESCRIPTION);
        get_event_by_id = "GetEventByID":
            fn(*mut FMOD_STUDIO_SYSTEM, *const FMOD_GUID, *mut *mut FMOD_STUDIO_EVENTDESCRIPTION);
        get_bus = "GetBus": fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut *mut FMOD_STUDIO_BUS);
        get_vca = "GetVCA": fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut *mut FMOD_STUDIO_VCA);
        get_bank = "GetBank":
            fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut *mut FMOD_STUDIO_BANK);
        lookup_id = "LookupID": fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut FMOD_GUID);
        lookup_path = "LookupPath":
            fn(*mut FMOD_STUDIO_SYSTEM, *const FMOD_GUID, *mut c_char, c_int, *mut c_int);
        get_num_listeners = "GetNumListeners": fn(*mut FMOD_STUDIO_SYSTEM, *mut c_int);
        set_num_listeners = "SetNumListeners": fn(*mut FMOD_STUDIO_SYSTEM, c_int);
        get_listener_attributes = "GetListenerAttributes":
            fn(*mut FMOD_STUDIO_SYSTEM, c_int, *mut FMOD_3D_ATTRIBUTES, *mut FMOD_VECTOR);
        set_listener_attributes = "SetListenerAttributes":
            fn(*mut FMOD_STUDIO_SYSTEM, c_int, *const FMOD_3D_ATTRIBUTES, *const FMOD_VECTOR);
        load_bank_file = "LoadBankFile": fn(
            *mut FMOD_STUDIO_SYSTEM, *const c_char, FMOD_STUDIO_LOAD_BANK_FLAGS,
            *mut *mut FMOD_STUDIO_BANK
        );
        load_bank_memory = "LoadBankMemory": fn(
            *mut FMOD_STUDIO_SYSTEM, *const c_char, c_int, FMOD_STUDIO_LOAD_MEMORY_MODE,
            FMOD_STUDIO_LOAD_BANK_FLAGS, *mut *mut FMOD_STUDIO_BANK
        );
        unload_all = "UnloadAll": fn(*mut FMOD_STUDIO_SYSTEM);
        get_bank_count = "GetBankCount": fn(*mut FMOD_STUDIO_SYSTEM, *mut c_int);
        get_bank_list = "GetBankList":
            fn(*mut FMOD_STUDIO_SYSTEM, *mut *mut FMOD_STUDIO_BANK, c_int, *mut c_int);
        get_parameter_by_name = "GetParameterByName":
            fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, *mut c_float, *mut c_float);
        set_parameter_by_name = "SetParameterByName":
            fn(*mut FMOD_STUDIO_SYSTEM, *const c_char, c_float, FMOD_BOOL);
        get_parameter_description_count = "GetParameterDescriptionCount":
            fn(*mut FMOD_STUDIO_SYSTEM, *mut c_int);
        get_parameter_description_list = "GetParameterDescriptionList": fn(
            *mut FMOD_STUDIO_SYSTEM, *mut FMOD_STUDIO_PARAMETER_DESCRIPTION, c_int, *mut c_int
        );
    }
}

function_table! {
    pub struct BankFns {
        get_id = "GetID": fn(*mut FMOD_STUDIO_BANK, *mut FMOD_GUID);
        get_path = "GetPath": fn(*mut FMOD_STUDIO_BANK, *mut c_char, c_int, *mut c_int);
        unload = "Unload": fn(*mut FMOD_STUDIO_BANK);
        load_sample_data = "LoadSampleData": fn(*mut FMOD_STUDIO_BANK);
        unload_sample_data = "UnloadSampleData": fn(*mut FMOD_STUDIO_BANK);
        get_loading_state = "GetLoadingState":
            fn(*mut FMOD_STUDIO_BANK, *mut FMOD_STUDIO_LOADING_STATE);
        get_sample_loading_state = "GetSampleLoadingState":
            fn(*mut FMOD_STUDIO_BANK, *mut FMOD_STUDIO_LOADING_STATE);
        get_event_count = "GetEventCount": fn(*mut FMOD_STUDIO_BANK, *mut c_int);
        get_event_list = "GetEventList": fn(
            *mut FMOD_STUDIO_BANK, *mut *mut FMOD_STUDIO_EVENTDESCRIPTION, c_int, *mut c_int
        );
        get_bus_count = "GetBusCount": fn(*mut FMOD_STUDIO_BANK, *mut c_int);
        get_bus_list = "GetBusList":
            fn(*mut FMOD_STUDIO_BANK, *mut *mut FMOD_STUDIO_BUS, c_int, *mut c_int);
        get_vca_count = "GetVCACount": fn(*mut FMOD_STUDIO_BANK, *mut c_int);
        get_vca_list = "GetVCAList":
            fn(*mut FMOD_STUDIO_BANK, *mut *mut FMOD_STUDIO_VCA, c_int, *mut c_int);
        get_string_count = "GetStringCount": fn(*mut FMOD_STUDIO_BANK, *mut c_int);
        get_string_info = "GetStringInfo":
            fn(*mut FMOD_STUDIO_BANK, c_int, *mut FMOD_GUID, *mut c_char, c_int, *mut c_int);
    }
}

function_table! {
    pub struct EventDescriptionFns {
        get_id = "GetID": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_GUID);
        get_path = "GetPath":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_char, c_int, *mut c_int);
        get_parameter_description_count = "GetParameterDescriptionCount":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_int);
        get_parameter_description_by_index = "GetParameterDescriptionByIndex":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, c_int, *mut FMOD_STUDIO_PARAMETER_DESCRIPTION);
        get_parameter_description_by_name = "GetParameterDescriptionByName": fn(
            *mut FMOD_STUDIO_EVENTDESCRIPTION, *const c_char,
            *mut FMOD_STUDIO_PARAMETER_DESCRIPTION
        );
        get_length = "GetLength": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_int);
        get_min_max_distance = "GetMinMaxDistance":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_float, *mut c_float);
        get_sound_size = "GetSoundSize": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_float);
        is_snapshot = "IsSnapshot": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_BOOL);
        is_oneshot = "IsOneshot": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_BOOL);
        is_stream = "IsStream": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_BOOL);
        is_3d = "Is3D": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_BOOL);
        is_doppler_enabled = "IsDopplerEnabled":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_BOOL);
        create_instance = "CreateInstance":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut *mut FMOD_STUDIO_EVENTINSTANCE);
        get_instance_count = "GetInstanceCount": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut c_int);
        get_instance_list = "GetInstanceList": fn(
            *mut FMOD_STUDIO_EVENTDESCRIPTION, *mut *mut FMOD_STUDIO_EVENTINSTANCE, c_int,
            *mut c_int
        );
        load_sample_data = "LoadSampleData": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION);
        unload_sample_data = "UnloadSampleData": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION);
        get_sample_loading_state = "GetSampleLoadingState":
            fn(*mut FMOD_STUDIO_EVENTDESCRIPTION, *mut FMOD_STUDIO_LOADING_STATE);
        release_all_instances = "ReleaseAllInstances": fn(*mut FMOD_STUDIO_EVENTDESCRIPTION);
    }
}

function_table! {
    pub struct EventInstanceFns {
        get_description = "GetDescription":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut *mut FMOD_STUDIO_EVENTDESCRIPTION);
        get_volume = "GetVolume": fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut c_float, *mut c_float);
        set_volume = "SetVolume": fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_float);
        get_pitch = "GetPitch": fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut c_float, *mut c_float);
        set_pitch = "SetPitch": fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_float);
        get_3d_attributes = "Get3DAttributes":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut FMOD_3D_ATTRIBUTES);
        set_3d_attributes = "Set3DAttributes":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *const FMOD_3D_ATTRIBUTES);
        get_listener_mask = "GetListenerMask": fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut c_uint);
        set_listener_mask = "SetListenerMask": fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_uint);
        get_property = "GetProperty":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, FMOD_STUDIO_EVENT_PROPERTY, *mut c_float);
        set_property = "SetProperty":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, FMOD_STUDIO_EVENT_PROPERTY, c_float);
        get_reverb_level = "GetReverbLevel":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_int, *mut c_float);
        set_reverb_level = "SetReverbLevel": fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_int, c_float);
        get_paused = "GetPaused": fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut FMOD_BOOL);
        set_paused = "SetPaused": fn(*mut FMOD_STUDIO_EVENTINSTANCE, FMOD_BOOL);
        start = "Start": fn(*mut FMOD_STUDIO_EVENTINSTANCE);
        stop = "Stop": fn(*mut FMOD_STUDIO_EVENTINSTANCE, FMOD_STUDIO_STOP_MODE);
        get_timeline_position = "GetTimelinePosition":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut c_int);
        set_timeline_position = "SetTimelinePosition": fn(*mut FMOD_STUDIO_EVENTINSTANCE, c_int);
        get_playback_state = "GetPlaybackState":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut FMOD_STUDIO_PLAYBACK_STATE);
        get_channel_group = "GetChannelGroup":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut *mut FMOD_CHANNELGROUP);
        release = "Release": fn(*mut FMOD_STUDIO_EVENTINSTANCE);
        is_virtual = "IsVirtual": fn(*mut FMOD_STUDIO_EVENTINSTANCE, *mut FMOD_BOOL);
        get_parameter_by_name = "GetParameterByName":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *const c_char, *mut c_float, *mut c_float);
        set_parameter_by_name = "SetParameterByName":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, *const c_char, c_float, FMOD_BOOL);
        get_parameter_by_id = "GetParameterByID": fn(
            *mut FMOD_STUDIO_EVENTINSTANCE, FMOD_STUDIO_PARAMETER_ID, *mut c_float, *mut c_float
        );
        set_parameter_by_id = "SetParameterByID":
            fn(*mut FMOD_STUDIO_EVENTINSTANCE, FMOD_STUDIO_PARAMETER_ID, c_float, FMOD_BOOL);
        key_off = "KeyOff": fn(*mut FMOD_STUDIO_EVENTINSTANCE);
    }
}

function_table! {
    pub struct BusFns {
        get_id = "GetID": fn(*mut FMOD_STUDIO_BUS, *mut FMOD_GUID);
        get_path = "GetPath": fn(*mut FMOD_STUDIO_BUS, *mut c_char, c_int, *mut c_int);
        get_volume = "GetVolume": fn(*mut FMOD_STUDIO_BUS, *mut c_float, *mut c_float);
        set_volume = "SetVolume": fn(*mut FMOD_STUDIO_BUS, c_float);
        get_paused = "GetPaused": fn(*mut FMOD_STUDIO_BUS, *mut FMOD_BOOL);
        set_paused = "SetPaused": fn(*mut FMOD_STUDIO_BUS, FMOD_BOOL);
        get_mute = "GetMute": fn(*mut FMOD_STUDIO_BUS, *mut FMOD_BOOL);
        set_mute = "SetMute": fn(*mut FMOD_STUDIO_BUS, FMOD_BOOL);
        stop_all_events = "StopAllEvents": fn(*mut FMOD_STUDIO_BUS, FMOD_STUDIO_STOP_MODE);
        lock_channel_group = "LockChannelGroup": fn(*mut FMOD_STUDIO_BUS);
        unlock_channel_group = "UnlockChannelGroup": fn(*mut FMOD_STUDIO_BUS);
        get_channel_group = "GetChannelGroup":
            fn(*mut FMOD_STUDIO_BUS, *mut *mut FMOD_CHANNELGROUP);
    }
}

function_table! {
    pub struct VcaFns {
        get_id = "GetID": fn(*mut FMOD_STUDIO_VCA, *mut FMOD_GUID);
        get_path = "GetPath": fn(*mut FMOD_STUDIO_VCA, *mut c_char, c_int, *mut c_int);
        get_volume = "GetVolume": fn(*mut FMOD_STUDIO_VCA, *mut c_float, *mut c_float);
        set_volume = "SetVolume": fn(*mut FMOD_STUDIO_VCA, c_float);
    }
}
