use vantage_gl::driver::HeadlessDriver;
use vantage_gl::{
    BufferTarget, ContextDesc, Gl, GlError, ObjectKind, SurfaceId,
};

fn session() -> Gl<HeadlessDriver> {
    vantage_utils::init_logging();
    Gl::new(HeadlessDriver::new())
}

#[test]
fn current_context_bookkeeping() {
    let mut gl = session();
    let first = gl.create_context(ContextDesc::default()).unwrap();
    let second = gl.create_context(ContextDesc::default()).unwrap();

    assert_eq!(gl.current(), None);

    gl.make_current(first, SurfaceId(1)).unwrap();
    assert!(gl.is_current(first));
    assert!(!gl.is_current(second));
    assert_eq!(gl.driver().current_surface(), Some(SurfaceId(1)));

    // Making another context current displaces the previous one.
    gl.make_current(second, SurfaceId(2)).unwrap();
    assert!(gl.is_current(second));
    assert!(!gl.is_current(first));

    gl.clear_current();
    assert_eq!(gl.current(), None);
}

#[test]
fn destroying_the_current_context_clears_it() {
    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.make_current(ctx, SurfaceId(1)).unwrap();

    gl.destroy_context(ctx);

    assert_eq!(gl.current(), None);
    assert!(gl.context(ctx).is_none());
    assert!(matches!(
        gl.is_buffer_target_bound(BufferTarget::Array),
        Err(GlError::NoCurrentContext)
    ));
}

#[test]
fn making_a_destroyed_context_current_fails() {
    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.destroy_context(ctx);

    assert!(matches!(
        gl.make_current(ctx, SurfaceId(1)),
        Err(GlError::Driver { .. })
    ));
}

#[test]
fn sharing_contexts_join_one_share_group() {
    let mut gl = session();
    let first = gl.create_context(ContextDesc::default()).unwrap();
    let second = gl
        .create_context(ContextDesc::builder().share_with(first).build())
        .unwrap();
    let third = gl
        .create_context(ContextDesc::builder().share_with(second).build())
        .unwrap();
    let loner = gl.create_context(ContextDesc::default()).unwrap();

    let group = gl.context(first).unwrap().share_group();
    assert_eq!(gl.context(second).unwrap().share_group(), group);
    assert_eq!(gl.context(third).unwrap().share_group(), group);
    assert_ne!(gl.context(loner).unwrap().share_group(), group);

    // A context without sharing forms its own group.
    let loner_ctx = gl.context(loner).unwrap();
    assert_eq!(loner_ctx.share_group(), loner_ctx.uid());
}

#[test]
fn sharing_with_a_destroyed_context_fails() {
    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.destroy_context(ctx);

    assert!(matches!(
        gl.create_context(ContextDesc::builder().share_with(ctx).build()),
        Err(GlError::Driver { .. })
    ));
}

#[test]
fn caches_survive_context_switches() {
    let mut gl = session();
    let first = gl.create_context(ContextDesc::default()).unwrap();
    let second = gl.create_context(ContextDesc::default()).unwrap();

    gl.make_current(first, SurfaceId(1)).unwrap();
    let buffer = gl.create_buffer().unwrap();
    gl.bind_buffer(&buffer, BufferTarget::Array).unwrap();
    assert_eq!(gl.driver().counters().bind_buffer, 1);

    // The other context has its own, empty cache.
    gl.make_current(second, SurfaceId(2)).unwrap();
    assert!(!gl.is_buffer_target_bound(BufferTarget::Array).unwrap());

    // Back on the first context the binding is still known, and rebinding
    // is still elided.
    gl.make_current(first, SurfaceId(1)).unwrap();
    assert!(gl.is_buffer_bound(&buffer, BufferTarget::Array).unwrap());
    gl.bind_buffer(&buffer, BufferTarget::Array).unwrap();
    assert_eq!(gl.driver().counters().bind_buffer, 1);

    gl.delete_buffer(buffer).unwrap();
}

#[test]
fn driver_reuses_names_but_uids_stay_unique() {
    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.make_current(ctx, SurfaceId(1)).unwrap();

    let first = gl.create_buffer().unwrap();
    let first_name = first.name();
    let first_uid = first.uid();
    gl.delete_buffer(first).unwrap();
    assert!(!gl.driver().is_live(ObjectKind::Buffer, first_name));

    let second = gl.create_buffer().unwrap();
    assert_eq!(second.name(), first_name);
    assert_ne!(second.uid(), first_uid);

    gl.delete_buffer(second).unwrap();
}

#[test]
fn shader_creation_and_deletion() {
    use vantage_gl::ShaderStage;

    let mut gl = session();
    let ctx = gl.create_context(ContextDesc::default()).unwrap();
    gl.make_current(ctx, SurfaceId(1)).unwrap();

    let vertex = gl.create_shader(ShaderStage::Vertex).unwrap();
    let fragment = gl.create_shader(ShaderStage::Fragment).unwrap();
    assert_ne!(vertex.uid(), fragment.uid());

    gl.delete_shader(vertex).unwrap();
    gl.delete_shader(fragment).unwrap();
}
